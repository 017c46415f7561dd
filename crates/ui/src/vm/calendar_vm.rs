use vocab_core::calendar::{CalendarGrid, ColorBucket};

/// Fill color for each intensity tier, least to most active.
#[must_use]
pub fn bucket_color(bucket: ColorBucket) -> &'static str {
    match bucket {
        ColorBucket::Empty => "#ebedf0",
        ColorBucket::Low => "#c6e48b",
        ColorBucket::Medium => "#7bc96f",
        ColorBucket::High => "#239a3b",
        ColorBucket::Max => "#196127",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarCellVm {
    /// Slot before the first day of the window.
    Padding,
    Day {
        title: String,
        color: &'static str,
        level: u8,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarVm {
    pub weeks: Vec<Vec<CalendarCellVm>>,
    pub legend: Vec<&'static str>,
    pub total_label: String,
}

#[must_use]
pub fn map_calendar(grid: &CalendarGrid) -> CalendarVm {
    let weeks = grid
        .weeks()
        .iter()
        .map(|week| {
            week.iter()
                .map(|slot| match slot {
                    None => CalendarCellVm::Padding,
                    Some(cell) => CalendarCellVm::Day {
                        title: format!("{}: {} words", cell.date.format("%Y-%m-%d"), cell.count),
                        color: bucket_color(cell.bucket),
                        level: cell.bucket.level(),
                    },
                })
                .collect()
        })
        .collect();

    let total = grid.total_count();
    let total_label = match total {
        1 => "1 word answered".to_string(),
        n => format!("{n} words answered"),
    };

    CalendarVm {
        weeks,
        legend: ColorBucket::ALL.iter().copied().map(bucket_color).collect(),
        total_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vocab_core::calendar::build_grid;
    use vocab_core::model::ActivitySample;

    #[test]
    fn maps_cells_with_titles_and_colors() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let grid = build_grid(
            &[ActivitySample::new(day, 12)],
            3,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap();
        let vm = map_calendar(&grid);

        assert_eq!(vm.weeks.len(), 1);
        assert_eq!(
            vm.weeks[0][1],
            CalendarCellVm::Day {
                title: "2024-01-01: 12 words".into(),
                color: "#239a3b",
                level: 3,
            }
        );
        assert_eq!(vm.total_label, "12 words answered");
    }

    #[test]
    fn padding_cells_carry_no_title() {
        let grid = build_grid(&[], 10, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()).unwrap();
        let vm = map_calendar(&grid);
        let padding = vm.weeks[0]
            .iter()
            .take_while(|cell| **cell == CalendarCellVm::Padding)
            .count();
        assert_eq!(padding, 3);
    }

    #[test]
    fn legend_runs_from_less_to_more() {
        let grid = build_grid(&[], 1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        assert_eq!(
            map_calendar(&grid).legend,
            vec!["#ebedf0", "#c6e48b", "#7bc96f", "#239a3b", "#196127"]
        );
    }
}
