//! Delete Confirm Button Component
//!
//! Two-click delete. The first click arms the button and shows the prompt in
//! place of the ×; a second click while armed deletes. Leaving the button or
//! waiting `ARM_WINDOW_MS` disarms it.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const ARM_WINDOW_MS: u32 = 3000;

/// Arming state. Each arming is numbered so a timer from an earlier arming
/// never disarms a later one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Arming {
    count: u64,
    armed: Option<u64>,
}

impl Arming {
    /// Returns true when this click confirms the delete.
    fn click(&mut self) -> bool {
        if self.armed.take().is_some() {
            return true;
        }
        self.count += 1;
        self.armed = Some(self.count);
        false
    }

    fn expire(&mut self, arm: u64) {
        if self.armed == Some(arm) {
            self.armed = None;
        }
    }

    fn disarm(&mut self) {
        self.armed = None;
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] prompt: Option<String>,
) -> impl IntoView {
    let state = RwSignal::new(Arming::default());
    let prompt = prompt.unwrap_or_else(|| "Delete?".to_string());
    let armed = move || state.with(Arming::is_armed);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let mut confirmed = false;
        state.update(|s| confirmed = s.click());
        if confirmed {
            on_confirm.run(());
            return;
        }
        let Some(arm) = state.with_untracked(|s| s.armed) else { return };
        spawn_local(async move {
            TimeoutFuture::new(ARM_WINDOW_MS).await;
            // the row may be gone by now
            state.try_update(|s| s.expire(arm));
        });
    };

    let class = move || {
        if armed() {
            format!("{} armed", button_class)
        } else {
            button_class.clone()
        }
    };

    view! {
        <button
            type="button"
            class=class
            title=move || if armed() { "Click again to delete" } else { "Delete" }
            on:mousedown=|ev| ev.stop_propagation()
            on:click=on_click
            on:mouseleave=move |_| state.update(Arming::disarm)
        >
            {move || if armed() { prompt.clone() } else { "×".to_string() }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_click_confirms() {
        let mut state = Arming::default();
        assert!(!state.click());
        assert!(state.is_armed());
        assert!(state.click());
        assert!(!state.is_armed());
    }

    #[test]
    fn test_old_timer_leaves_newer_arming() {
        let mut state = Arming::default();
        state.click();
        let first = state.armed.unwrap();
        state.disarm();
        state.click();
        state.expire(first);
        assert!(state.is_armed());

        let second = state.armed.unwrap();
        state.expire(second);
        assert!(!state.is_armed());
        assert!(!state.click());
    }
}
