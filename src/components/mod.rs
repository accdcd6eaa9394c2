//! UI Components
//!
//! Reusable Leptos components.

mod board_picker;
mod board_view;
mod card_tile;
mod column_lane;
mod container_slot;
mod delete_confirm_button;
mod new_card_form;
mod new_column_form;
mod notice_toast;
mod priority_selector;
mod subtask_list;
mod tag_bar;

pub use board_picker::BoardPicker;
pub use board_view::BoardView;
pub use card_tile::CardTile;
pub use column_lane::ColumnLane;
pub use container_slot::ContainerSlot;
pub use delete_confirm_button::DeleteConfirmButton;
pub use new_card_form::NewCardForm;
pub use new_column_form::NewColumnForm;
pub use notice_toast::NoticeToast;
pub use priority_selector::{PrioritySelector, PRIORITIES};
pub use subtask_list::SubtaskList;
pub use tag_bar::TagBar;
