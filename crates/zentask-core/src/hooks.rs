use std::fmt;

use tracing::debug;

use crate::list::Theme;

/// Side-effect signals raised by the store toward the presentation layer.
///
/// Every method has a no-op default so implementors only override the
/// signals they care about.
pub trait StoreHooks {
    /// Called after the active theme changed.
    fn on_theme_change(&self, _theme: Theme) {}

    /// Called when a snapshot could not be written. The in-memory state has
    /// already been updated and stays authoritative.
    fn on_persist_failure(&self, _error: &anyhow::Error) {}
}

/// Registered hooks, invoked in registration order.
#[derive(Default)]
pub struct HookRunner {
    hooks: Vec<Box<dyn StoreHooks>>,
}

impl fmt::Debug for HookRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRunner")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl HookRunner {
    pub fn register(&mut self, hook: Box<dyn StoreHooks>) {
        self.hooks.push(hook);
        debug!(count = self.hooks.len(), "registered store hook");
    }

    pub fn theme_changed(&self, theme: Theme) {
        debug!(theme = theme.as_str(), count = self.hooks.len(), "running theme hooks");
        for hook in &self.hooks {
            hook.on_theme_change(theme);
        }
    }

    pub fn persist_failed(&self, error: &anyhow::Error) {
        for hook in &self.hooks {
            hook.on_persist_failure(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{HookRunner, StoreHooks};
    use crate::list::Theme;

    struct Recorder(Rc<RefCell<Vec<Theme>>>);

    impl StoreHooks for Recorder {
        fn on_theme_change(&self, theme: Theme) {
            self.0.borrow_mut().push(theme);
        }
    }

    struct Silent;

    impl StoreHooks for Silent {}

    #[test]
    fn runs_hooks_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut runner = HookRunner::default();
        runner.register(Box::new(Silent));
        runner.register(Box::new(Recorder(Rc::clone(&seen))));

        runner.theme_changed(Theme::Dark);
        runner.persist_failed(&anyhow::anyhow!("disk full"));
        runner.theme_changed(Theme::Light);

        assert_eq!(*seen.borrow(), [Theme::Dark, Theme::Light]);
    }
}
