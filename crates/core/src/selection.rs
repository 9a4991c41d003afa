use crate::{sorted_tokens, Card, CardError};

/// Cards a local human seat has marked for play. No hand membership check
/// here; the server rules on legality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    picked: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership, returning whether the token is now selected.
    pub fn toggle(&mut self, token: &str) -> Result<bool, CardError> {
        Card::parse(token)?;
        if let Some(pos) = self.picked.iter().position(|picked| picked == token) {
            self.picked.remove(pos);
            Ok(false)
        } else {
            self.picked.push(token.to_string());
            Ok(true)
        }
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    /// Replace the whole selection, discarding any manual picks.
    pub fn replace(&mut self, tokens: &[String]) -> Result<(), CardError> {
        let mut next = Vec::with_capacity(tokens.len());
        for token in tokens {
            Card::parse(token)?;
            if !next.contains(token) {
                next.push(token.clone());
            }
        }
        self.picked = next;
        Ok(())
    }

    /// Ascending card order regardless of click order.
    pub fn members(&self) -> Vec<String> {
        sorted_tokens(&self.picked).expect("selection only holds validated tokens")
    }

    pub fn contains(&self, token: &str) -> bool {
        self.picked.iter().any(|picked| picked == token)
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }
}
