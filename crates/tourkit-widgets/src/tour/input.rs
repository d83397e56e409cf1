#![forbid(unsafe_code)]

//! Keyboard ownership for a running tour.
//!
//! The terminal has one keyboard stream. [`KeyboardHub`] records who is
//! listening to it; a [`KeyClaim`] is the right to listen and gives it back
//! when dropped. [`InputBinder`] holds a claim exactly while a tour is
//! running, so every way a tour can end (finishing, the host clearing the
//! index, the host dropping the tour) also releases the keyboard.

use std::cell::Cell;
use std::rc::Rc;

use tourkit_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};

use super::navigator::NavAction;

/// The keyboard could not be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    /// Someone else is listening.
    #[error("keyboard is already claimed by {owner}")]
    Busy {
        /// Current holder.
        owner: &'static str,
    },
}

/// Shared record of who owns the keyboard stream.
///
/// Clones share the same record. Not `Send`: input lives on the UI thread.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    holder: Rc<Cell<Option<&'static str>>>,
}

impl KeyboardHub {
    /// A hub nobody holds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the keyboard for `owner`.
    pub fn claim(&self, owner: &'static str) -> Result<KeyClaim, ClaimError> {
        if let Some(current) = self.holder.get() {
            return Err(ClaimError::Busy { owner: current });
        }
        self.holder.set(Some(owner));
        Ok(KeyClaim {
            holder: Rc::clone(&self.holder),
            owner,
        })
    }

    /// Current holder, if any.
    pub fn holder(&self) -> Option<&'static str> {
        self.holder.get()
    }

    /// Whether anyone holds the keyboard.
    pub fn is_claimed(&self) -> bool {
        self.holder.get().is_some()
    }
}

/// Exclusive use of a [`KeyboardHub`]. Released on drop.
#[derive(Debug)]
#[must_use = "the keyboard is released as soon as the claim is dropped"]
pub struct KeyClaim {
    holder: Rc<Cell<Option<&'static str>>>,
    owner: &'static str,
}

impl KeyClaim {
    /// Who holds this claim.
    pub fn owner(&self) -> &'static str {
        self.owner
    }
}

impl Drop for KeyClaim {
    fn drop(&mut self) {
        if self.holder.get() == Some(self.owner) {
            self.holder.set(None);
        }
    }
}

/// Map a key to a navigation request.
///
/// `Right` and `Enter` advance, `Left` goes back, `Escape` ends the tour.
/// Releases and chords with Ctrl or Alt map to nothing.
pub fn map_key(key: &KeyEvent) -> Option<NavAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Right | KeyCode::Enter => Some(NavAction::Next),
        KeyCode::Left => Some(NavAction::Back),
        KeyCode::Escape => Some(NavAction::Finish),
        _ => None,
    }
}

/// Attaches tour key handling to a hub while a tour runs.
#[derive(Debug)]
pub struct InputBinder {
    owner: &'static str,
    claim: Option<KeyClaim>,
    blocked: bool,
}

impl InputBinder {
    /// A detached binder that will claim as `owner`.
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            claim: None,
            blocked: false,
        }
    }

    /// Name used when claiming.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Attach if `running`, detach if not. Returns whether attached.
    ///
    /// A busy hub leaves the binder detached; the claim is retried on every
    /// later sync. The warning is logged once per busy stretch.
    pub fn sync(&mut self, running: bool, hub: &KeyboardHub) -> bool {
        if !running {
            self.detach();
            return false;
        }
        if self.claim.is_some() {
            return true;
        }
        match hub.claim(self.owner) {
            Ok(claim) => {
                tourkit_core::debug!(target: "tourkit::input", owner = self.owner, "keys attached");
                self.claim = Some(claim);
                self.blocked = false;
                true
            }
            Err(_err) => {
                if !self.blocked {
                    tourkit_core::warn!(
                        target: "tourkit::input",
                        owner = self.owner,
                        error = %_err,
                        "tour keys not attached"
                    );
                    self.blocked = true;
                }
                false
            }
        }
    }

    /// Whether the binder holds the keyboard.
    pub fn is_attached(&self) -> bool {
        self.claim.is_some()
    }

    /// Release the keyboard if held.
    pub fn detach(&mut self) {
        self.blocked = false;
        if self.claim.take().is_some() {
            tourkit_core::debug!(target: "tourkit::input", owner = self.owner, "keys detached");
        }
    }

    /// The navigation request for `event`, if attached and it maps to one.
    pub fn handle(&self, event: &Event) -> Option<NavAction> {
        if !self.is_attached() {
            return None;
        }
        event.key_press().and_then(map_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    // ── hub ─────────────────────────────────────────────────────────────

    #[test]
    fn claim_is_exclusive_and_released_on_drop() {
        let hub = KeyboardHub::new();
        let claim = hub.claim("tour").unwrap();
        assert_eq!(claim.owner(), "tour");
        assert_eq!(hub.holder(), Some("tour"));
        assert_eq!(
            hub.claim("editor").unwrap_err(),
            ClaimError::Busy { owner: "tour" }
        );
        drop(claim);
        assert!(!hub.is_claimed());
        assert!(hub.claim("editor").is_ok());
    }

    #[test]
    fn clones_share_the_record() {
        let hub = KeyboardHub::new();
        let other = hub.clone();
        let _claim = hub.claim("tour").unwrap();
        assert_eq!(other.holder(), Some("tour"));
    }

    #[test]
    fn busy_error_names_holder() {
        let err = ClaimError::Busy { owner: "search" };
        assert_eq!(err.to_string(), "keyboard is already claimed by search");
    }

    // ── mapping ─────────────────────────────────────────────────────────

    #[test]
    fn key_map() {
        let cases = [
            (KeyCode::Right, Some(NavAction::Next)),
            (KeyCode::Enter, Some(NavAction::Next)),
            (KeyCode::Left, Some(NavAction::Back)),
            (KeyCode::Escape, Some(NavAction::Finish)),
            (KeyCode::Up, None),
            (KeyCode::Char('q'), None),
        ];
        for (code, expected) in cases {
            assert_eq!(map_key(&KeyEvent::new(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn releases_and_chords_ignored() {
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        assert_eq!(map_key(&release), None);
        let ctrl = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::CTRL);
        assert_eq!(map_key(&ctrl), None);
        let shift = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SHIFT);
        assert_eq!(map_key(&shift), Some(NavAction::Next));
    }

    // ── binder ──────────────────────────────────────────────────────────

    #[test]
    fn binder_follows_running() {
        let hub = KeyboardHub::new();
        let mut binder = InputBinder::new("tour");
        assert!(binder.sync(true, &hub));
        assert!(hub.is_claimed());
        assert!(binder.sync(true, &hub));
        assert!(!binder.sync(false, &hub));
        assert!(!hub.is_claimed());
    }

    #[test]
    fn detached_binder_ignores_keys() {
        let binder = InputBinder::new("tour");
        assert_eq!(binder.handle(&key(KeyCode::Right)), None);
    }

    #[test]
    fn attached_binder_maps_keys() {
        let hub = KeyboardHub::new();
        let mut binder = InputBinder::new("tour");
        binder.sync(true, &hub);
        assert_eq!(binder.handle(&key(KeyCode::Left)), Some(NavAction::Back));
        assert_eq!(binder.handle(&Event::Tick), None);
    }

    #[test]
    fn busy_hub_retries_next_sync() {
        let hub = KeyboardHub::new();
        let other = hub.claim("palette").unwrap();
        let mut binder = InputBinder::new("tour");
        assert!(!binder.sync(true, &hub));
        assert!(!binder.sync(true, &hub));
        assert_eq!(hub.holder(), Some("palette"));
        drop(other);
        assert!(binder.sync(true, &hub));
        assert_eq!(hub.holder(), Some("tour"));
    }

    #[test]
    fn dropping_binder_releases() {
        let hub = KeyboardHub::new();
        {
            let mut binder = InputBinder::new("tour");
            binder.sync(true, &hub);
        }
        assert!(!hub.is_claimed());
    }
}
