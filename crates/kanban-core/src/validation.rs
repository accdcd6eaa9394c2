//! Input validation
//!
//! Runs before any optimistic change; a rejected input never touches the
//! cache or the persistence layer.

use crate::config::Limits;
use crate::domain::{
    Board, BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, NewBoard, NewCard, NewColumn,
    NewSubtask, NewTag, Subtask, SubtaskId, SubtaskUpdate, Tag, TagId, TagUpdate, WorkspaceId, ALLOWED_BOARD_ICONS,
    ALLOWED_COLUMN_ICONS, DEFAULT_BOARD_ICON, DEFAULT_WORKSPACE_ID,
};
use crate::error::{BoardError, Result};

fn invalid(msg: impl Into<String>) -> BoardError {
    let msg = msg.into();
    log::debug!("[validation] {}", msg);
    BoardError::Validation(msg)
}

/// Trim and bound a required title.
pub fn validate_title(raw: &str, field: &str, limits: &Limits) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(invalid(format!("{field} cannot be empty")));
    }
    if title.chars().count() > limits.max_title_len {
        return Err(invalid(format!(
            "{field} too long (max {} characters)",
            limits.max_title_len
        )));
    }
    Ok(title.to_string())
}

/// Trim optional free text; blank becomes `None`.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_description(value: Option<String>, limits: &Limits) -> Result<Option<String>> {
    let value = normalize_optional_text(value);
    if let Some(text) = &value {
        if text.chars().count() > limits.max_description_len {
            return Err(invalid(format!(
                "description too long (max {} characters)",
                limits.max_description_len
            )));
        }
    }
    Ok(value)
}

/// `#RRGGBB` or nothing.
pub fn normalize_color(color: Option<String>, field: &str) -> Result<Option<String>> {
    match color {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else if trimmed.len() == 7
                && trimmed.starts_with('#')
                && trimmed.chars().skip(1).all(|c| c.is_ascii_hexdigit())
            {
                Ok(Some(trimmed.to_string()))
            } else {
                Err(invalid(format!(
                    "invalid {field} color '{trimmed}', expected hex such as #6366F1"
                )))
            }
        }
        None => Ok(None),
    }
}

pub fn normalize_column_icon(icon: Option<String>) -> Result<Option<String>> {
    match icon
        .as_ref()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
    {
        Some(value) if ALLOWED_COLUMN_ICONS.contains(&value) => Ok(Some(value.to_string())),
        Some(value) => Err(invalid(format!("unknown column icon '{value}'"))),
        None => Ok(None),
    }
}

pub fn normalize_board_icon(icon: Option<String>) -> Result<String> {
    match icon
        .as_ref()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
    {
        Some(value) if ALLOWED_BOARD_ICONS.contains(&value) => Ok(value.to_string()),
        Some(value) => Err(invalid(format!("unknown board icon '{value}'"))),
        None => Ok(DEFAULT_BOARD_ICON.to_string()),
    }
}

pub fn validate_wip_limit(limit: Option<i64>) -> Result<Option<i64>> {
    match limit {
        Some(limit) if limit < 1 => Err(invalid("WIP limit must be a positive integer")),
        other => Ok(other),
    }
}

pub fn build_board(input: NewBoard, limits: &Limits) -> Result<Board> {
    Ok(Board {
        id: BoardId::generate(),
        workspace_id: input
            .workspace_id
            .unwrap_or_else(|| WorkspaceId::new(DEFAULT_WORKSPACE_ID)),
        title: validate_title(&input.title, "board title", limits)?,
        description: validate_description(input.description, limits)?,
        icon: normalize_board_icon(input.icon)?,
        emoji: None,
        color: None,
    })
}

/// Column appended at `position` on `board_id`.
pub fn build_column(board_id: &BoardId, input: NewColumn, position: i64, limits: &Limits) -> Result<Column> {
    Ok(Column {
        id: ColumnId::generate(),
        board_id: board_id.clone(),
        title: validate_title(&input.title, "column title", limits)?,
        position,
        wip_limit: validate_wip_limit(input.wip_limit)?,
        color: normalize_color(input.color, "column")?,
        icon: normalize_column_icon(input.icon)?,
        is_enabled: true,
    })
}

/// Card appended at `position` of its column. Tag ids are checked by the caller.
pub fn build_card(board_id: &BoardId, input: NewCard, position: i64, limits: &Limits) -> Result<Card> {
    Ok(Card {
        id: CardId::generate(),
        board_id: board_id.clone(),
        column_id: input.column_id,
        title: validate_title(&input.title, "card title", limits)?,
        description: validate_description(input.description, limits)?,
        position,
        priority: input.priority,
        due_date: normalize_optional_text(input.due_date),
        tag_ids: input.tag_ids,
        subtasks: Vec::new(),
    })
}

/// Subtask appended at `position` of its card.
pub fn build_subtask(board_id: &BoardId, input: NewSubtask, position: i64, limits: &Limits) -> Result<Subtask> {
    Ok(Subtask {
        id: SubtaskId::generate(),
        board_id: board_id.clone(),
        card_id: input.card_id,
        title: validate_title(&input.title, "subtask title", limits)?,
        is_completed: false,
        position,
    })
}

pub fn validate_label(raw: &str, limits: &Limits) -> Result<String> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(invalid("tag label cannot be empty"));
    }
    if label.chars().count() > limits.max_label_len {
        return Err(invalid(format!(
            "tag label too long (max {} characters)",
            limits.max_label_len
        )));
    }
    Ok(label.to_string())
}

pub fn build_tag(board_id: &BoardId, input: NewTag, limits: &Limits) -> Result<Tag> {
    Ok(Tag {
        id: TagId::generate(),
        board_id: board_id.clone(),
        label: validate_label(&input.label, limits)?,
        color: normalize_color(input.color, "tag")?,
    })
}

pub fn validate_tag_update(update: &TagUpdate, limits: &Limits) -> Result<TagUpdate> {
    let mut clean = update.clone();
    if let Some(label) = &update.label {
        clean.label = Some(validate_label(label, limits)?);
    }
    if let Some(color) = &update.color {
        clean.color = Some(normalize_color(color.clone(), "tag")?);
    }
    Ok(clean)
}

pub fn validate_subtask_update(update: &SubtaskUpdate, limits: &Limits) -> Result<SubtaskUpdate> {
    let mut clean = update.clone();
    if let Some(title) = &update.title {
        clean.title = Some(validate_title(title, "subtask title", limits)?);
    }
    Ok(clean)
}

/// Normalized copy of a column update.
pub fn validate_column_update(update: &ColumnUpdate, limits: &Limits) -> Result<ColumnUpdate> {
    let mut clean = update.clone();
    if let Some(title) = &update.title {
        clean.title = Some(validate_title(title, "column title", limits)?);
    }
    if let Some(color) = &update.color {
        clean.color = Some(normalize_color(color.clone(), "column")?);
    }
    if let Some(icon) = &update.icon {
        clean.icon = Some(normalize_column_icon(icon.clone())?);
    }
    if let Some(limit) = update.wip_limit {
        clean.wip_limit = Some(validate_wip_limit(limit)?);
    }
    Ok(clean)
}

/// Normalized copy of a card update.
pub fn validate_card_update(update: &CardUpdate, limits: &Limits) -> Result<CardUpdate> {
    let mut clean = update.clone();
    if let Some(title) = &update.title {
        clean.title = Some(validate_title(title, "card title", limits)?);
    }
    if let Some(description) = &update.description {
        clean.description = Some(validate_description(description.clone(), limits)?);
    }
    if let Some(due_date) = &update.due_date {
        clean.due_date = Some(normalize_optional_text(due_date.clone()));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed_and_required() {
        let limits = Limits::default();
        assert_eq!(validate_title("  Doing ", "column title", &limits).unwrap(), "Doing");
        assert!(matches!(
            validate_title("   ", "column title", &limits),
            Err(BoardError::Validation(_))
        ));
        let long = "x".repeat(limits.max_title_len + 1);
        assert!(validate_title(&long, "card title", &limits).is_err());
    }

    #[test]
    fn test_color_rules() {
        assert_eq!(normalize_color(Some(" #a1B2c3 ".into()), "tag").unwrap(), Some("#a1B2c3".into()));
        assert_eq!(normalize_color(Some("".into()), "tag").unwrap(), None);
        assert!(normalize_color(Some("red".into()), "tag").is_err());
        assert!(normalize_color(Some("#12345G".into()), "tag").is_err());
    }

    #[test]
    fn test_icons() {
        assert_eq!(normalize_column_icon(Some("Zap".into())).unwrap(), Some("Zap".into()));
        assert!(normalize_column_icon(Some("Skull".into())).is_err());
        assert_eq!(normalize_board_icon(None).unwrap(), DEFAULT_BOARD_ICON);
        assert_eq!(normalize_board_icon(Some("Rocket".into())).unwrap(), "Rocket");
    }

    #[test]
    fn test_wip_limit_must_be_positive() {
        assert!(validate_wip_limit(Some(0)).is_err());
        assert_eq!(validate_wip_limit(Some(3)).unwrap(), Some(3));
        assert_eq!(validate_wip_limit(None).unwrap(), None);
    }

    #[test]
    fn test_build_card_normalizes_text() {
        let mut input = NewCard::new(ColumnId::new("c1"), " Ship it ");
        input.description = Some("   ".into());
        input.due_date = Some("".into());
        let card = build_card(&BoardId::new("b1"), input, 4, &Limits::default()).unwrap();
        assert_eq!(card.title, "Ship it");
        assert_eq!(card.description, None);
        assert_eq!(card.due_date, None);
        assert_eq!(card.position, 4);
    }

    #[test]
    fn test_tag_and_subtask_updates() {
        let limits = Limits::default();
        let mut update = TagUpdate::new(BoardId::new("b1"), TagId::new("t1"));
        update.label = Some("  blocked ".into());
        assert_eq!(validate_tag_update(&update, &limits).unwrap().label.as_deref(), Some("blocked"));
        update.label = Some(" ".into());
        assert!(validate_tag_update(&update, &limits).is_err());

        let mut update = SubtaskUpdate::new(BoardId::new("b1"), CardId::new("k1"), SubtaskId::new("s1"));
        update.title = Some(String::new());
        assert!(matches!(
            validate_subtask_update(&update, &limits),
            Err(BoardError::Validation(_))
        ));

        let subtask = build_subtask(&BoardId::new("b1"), NewSubtask::new(CardId::new("k1"), " Outline "), 2, &limits)
            .unwrap();
        assert_eq!(subtask.title, "Outline");
        assert_eq!(subtask.position, 2);
        assert!(!subtask.is_completed);
    }

    #[test]
    fn test_column_update_validation() {
        let limits = Limits::default();
        let mut update = ColumnUpdate::new(BoardId::new("b1"), ColumnId::new("c1"));
        update.title = Some("  Review ".into());
        update.color = Some(Some("  ".into()));
        let clean = validate_column_update(&update, &limits).unwrap();
        assert_eq!(clean.title.as_deref(), Some("Review"));
        assert_eq!(clean.color, Some(None));

        update.wip_limit = Some(Some(-1));
        assert!(validate_column_update(&update, &limits).is_err());
    }
}
