//! Wire shapes for the JSON API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storage::repository::NextWord;
use vocab_core::model::{
    ActivitySample, ChoiceOption, ProgressOverview, UserId, UserProfile, Word, WordId,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct WordDto {
    id: WordId,
    english: String,
    #[serde(default)]
    russian: String,
    #[serde(default)]
    audio_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionDto {
    id: WordId,
    english: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextWordDto {
    word: WordDto,
    options: Vec<OptionDto>,
    #[serde(default)]
    correct_id: Option<WordId>,
}

impl TryFrom<NextWordDto> for NextWord {
    type Error = ApiError;

    fn try_from(dto: NextWordDto) -> Result<Self, Self::Error> {
        let word = Word::new(
            dto.word.id,
            dto.word.english,
            dto.word.russian,
            dto.word.audio_path.unwrap_or_default(),
        )?;
        let options = dto
            .options
            .into_iter()
            .map(|option| ChoiceOption::new(option.id, option.english))
            .collect();
        Ok(NextWord {
            word,
            options,
            declared_correct: dto.correct_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityDto {
    date: NaiveDate,
    count: u32,
}

impl From<ActivityDto> for ActivitySample {
    fn from(dto: ActivityDto) -> Self {
        ActivitySample::new(dto.date, dto.count)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsDto {
    total: u32,
    learned: u32,
    accuracy: f64,
}

impl From<StatsDto> for ProgressOverview {
    fn from(dto: StatsDto) -> Self {
        ProgressOverview {
            total: dto.total,
            learned: dto.learned,
            accuracy: dto.accuracy,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenDto {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    id: UserId,
    email: String,
    #[serde(default)]
    username: Option<String>,
}

impl From<UserDto> for UserProfile {
    fn from(dto: UserDto) -> Self {
        let fallback = UserProfile::from_email(&dto.email);
        UserProfile {
            id: dto.id,
            username: dto
                .username
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(fallback.username),
            email: dto.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterDto<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}
