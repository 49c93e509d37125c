use crossterm::event::KeyCode;

/// Keyboard shortcut registrar
///
/// A component claims a set of keys while it needs them (an open dropdown
/// claims the arrows, Enter and Esc) and releases the claim afterwards. The
/// most recent claim on a key wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRegistry<O> {
    claims: Vec<(O, Vec<KeyCode>)>,
}

impl<O> Default for ShortcutRegistry<O> {
    fn default() -> Self {
        Self { claims: Vec::new() }
    }
}

impl<O: Copy + Eq> ShortcutRegistry<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `keys` for `owner`, replacing any previous claim of that owner.
    pub fn claim(&mut self, owner: O, keys: impl IntoIterator<Item = KeyCode>) {
        self.release(owner);
        self.claims.push((owner, keys.into_iter().collect()));
    }

    /// Drops every claim held by `owner`. Returns whether one existed.
    pub fn release(&mut self, owner: O) -> bool {
        let before = self.claims.len();
        self.claims.retain(|(o, _)| *o != owner);
        before != self.claims.len()
    }

    pub fn owner_of(&self, key: KeyCode) -> Option<O> {
        self.claims
            .iter()
            .rev()
            .find(|(_, keys)| keys.contains(&key))
            .map(|(owner, _)| *owner)
    }

    pub fn is_claimed_by(&self, owner: O) -> bool {
        self.claims.iter().any(|(o, _)| *o == owner)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
