// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-facing status text.

use defense_queue_domain::StatusLanguage;

/// Phase or outcome of a join attempt, as reported on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinStatus {
    /// Submit was pressed without a join code.
    MissingJoinCode,
    /// Joining with a variant the user picked.
    JoiningWithPick,
    /// Joining without a region.
    JoiningGeneral,
    /// Waiting for the resolve call.
    Resolving,
    /// The region resolved to nothing.
    RegionNotFound,
    /// Several variants are shown and one must be picked.
    AwaitingPick,
    /// Joining with the single resolved variant.
    JoiningWithTimezone,
    /// Joined with timezone weighting.
    JoinedWithTimezone,
    /// Joined the general queue.
    JoinedGeneral,
    /// A call failed; carries the message to show.
    Failed(String),
}

impl JoinStatus {
    /// Renders the status in the given language.
    #[must_use]
    pub fn text(&self, language: StatusLanguage) -> String {
        match (language, self) {
            (StatusLanguage::English, Self::MissingJoinCode) => "Enter the join code.".into(),
            (StatusLanguage::English, Self::JoiningWithPick) => {
                "Joining with the selected variant…".into()
            }
            (StatusLanguage::English, Self::JoiningGeneral) => "Joining the general queue…".into(),
            (StatusLanguage::English, Self::Resolving) => "Looking up the region…".into(),
            (StatusLanguage::English, Self::RegionNotFound) => {
                "Region not found. Clear the region to join the general queue, or try another spelling."
                    .into()
            }
            (StatusLanguage::English, Self::AwaitingPick) => {
                "Several variants found. Pick one and press Join again.".into()
            }
            (StatusLanguage::English, Self::JoiningWithTimezone) => {
                "Joining with timezone weighting…".into()
            }
            (StatusLanguage::English, Self::JoinedWithTimezone) => {
                "Done. You are in the queue with timezone weighting.".into()
            }
            (StatusLanguage::English, Self::JoinedGeneral) => {
                "Done. You joined the general queue.".into()
            }
            (StatusLanguage::English, Self::Failed(message)) => format!("Error: {message}"),
            (StatusLanguage::Russian, Self::MissingJoinCode) => "Введи код подключения.".into(),
            (StatusLanguage::Russian, Self::JoiningWithPick) => {
                "Записываю с выбранным вариантом…".into()
            }
            (StatusLanguage::Russian, Self::JoiningGeneral) => "Записываю в общую очередь…".into(),
            (StatusLanguage::Russian, Self::Resolving) => "Ищу регион в датасете…".into(),
            (StatusLanguage::Russian, Self::RegionNotFound) => {
                "Регион не найден. Удали регион и запишись в общую очередь, либо введи по-другому."
                    .into()
            }
            (StatusLanguage::Russian, Self::AwaitingPick) => {
                "Нашлось несколько вариантов. Выбери и нажми «Записаться» ещё раз.".into()
            }
            (StatusLanguage::Russian, Self::JoiningWithTimezone) => {
                "Записываю с учётом часового пояса…".into()
            }
            (StatusLanguage::Russian, Self::JoinedWithTimezone) => {
                "Готово. Ты записан(а) в очередь с учётом часового пояса.".into()
            }
            (StatusLanguage::Russian, Self::JoinedGeneral) => {
                "Готово. Ты записан(а) в общую очередь.".into()
            }
            (StatusLanguage::Russian, Self::Failed(message)) => format!("Ошибка: {message}"),
        }
    }
}

/// Status of the teacher queue view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueStatus {
    /// Waiting for the queue call.
    Refreshing,
    /// The queue was loaded; the status line is cleared.
    Loaded,
    /// A call failed; carries the message to show.
    Failed(String),
}

impl QueueStatus {
    /// Renders the status in the given language.
    #[must_use]
    pub fn text(&self, language: StatusLanguage) -> String {
        match (language, self) {
            (StatusLanguage::English, Self::Refreshing) => "Refreshing the queue…".into(),
            (StatusLanguage::Russian, Self::Refreshing) => "Обновляю очередь…".into(),
            (_, Self::Loaded) => String::new(),
            (StatusLanguage::English, Self::Failed(message)) => format!("Error: {message}"),
            (StatusLanguage::Russian, Self::Failed(message)) => format!("Ошибка: {message}"),
        }
    }
}

/// Placeholder text for an empty queue.
#[must_use]
pub const fn empty_queue_text(language: StatusLanguage) -> &'static str {
    match language {
        StatusLanguage::English => "Queue is empty",
        StatusLanguage::Russian => "Пока пусто",
    }
}
