use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("invalid card token: {0}")]
    InvalidToken(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
    SmallJoker,
    BigJoker,
}

impl Rank {
    pub const ALL: [Rank; 15] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::SmallJoker,
        Rank::BigJoker,
    ];

    /// Dou Dizhu ordering: 3 lowest, 2 above A, jokers above 2.
    pub fn order(self) -> u8 {
        match self {
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::Two => 15,
            Rank::SmallJoker => 16,
            Rank::BigJoker => 17,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "小王",
            Rank::BigJoker => "大王",
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.label() == label)
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

/// A token is a joker literal, a suit-prefixed rank, or a bare rank (the
/// rule engine deals suitless tokens). Duplicates are never deduplicated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub fn parse(token: &str) -> Result<Card, CardError> {
        if token == Rank::SmallJoker.label() {
            return Ok(Card {
                rank: Rank::SmallJoker,
                suit: None,
            });
        }
        if token == Rank::BigJoker.label() {
            return Ok(Card {
                rank: Rank::BigJoker,
                suit: None,
            });
        }
        let (suit, rest) = match Suit::ALL
            .into_iter()
            .find_map(|suit| token.strip_prefix(suit.symbol()).map(|rest| (suit, rest)))
        {
            Some((suit, rest)) => (Some(suit), rest),
            None => (None, token),
        };
        match Rank::from_label(rest) {
            Some(rank) if !rank.is_joker() => Ok(Card { rank, suit }),
            _ => Err(CardError::InvalidToken(token.to_string())),
        }
    }

    pub fn order(&self) -> u8 {
        self.rank.order()
    }

    pub fn display_rank(&self) -> &'static str {
        self.rank.label()
    }

    pub fn display_suit(&self) -> &'static str {
        self.suit.map(Suit::symbol).unwrap_or("")
    }
}

/// Rank order only; suits never break ties.
pub fn compare(a: &Card, b: &Card) -> Ordering {
    a.order().cmp(&b.order())
}

pub fn sort_ascending(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort_by(compare);
    cards
}

/// Parse and sort tokens for display; token text breaks rank ties.
pub fn sorted_tokens(tokens: &[String]) -> Result<Vec<String>, CardError> {
    let mut keyed = tokens
        .iter()
        .map(|token| Card::parse(token).map(|card| (card.order(), token.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort();
    Ok(keyed.into_iter().map(|(_, token)| token).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suited_bare_and_joker_tokens() {
        let suited = Card::parse("♠5").unwrap();
        assert_eq!(suited.rank, Rank::Five);
        assert_eq!(suited.suit, Some(Suit::Spades));
        assert_eq!(suited.display_suit(), "♠");

        let bare = Card::parse("10").unwrap();
        assert_eq!(bare.rank, Rank::Ten);
        assert_eq!(bare.suit, None);
        assert_eq!(bare.display_rank(), "10");

        let joker = Card::parse("大王").unwrap();
        assert_eq!(joker.rank, Rank::BigJoker);
        assert_eq!(joker.suit, None);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "♠", "♠♠3", "1", "♥小王", "xyz", "JOKER"] {
            assert_eq!(
                Card::parse(token),
                Err(CardError::InvalidToken(token.to_string())),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rank_order_is_strictly_increasing() {
        let orders: Vec<u8> = Rank::ALL.iter().map(|rank| rank.order()).collect();
        for pair in orders.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Rank::Two.order(), 15);
        assert!(Rank::SmallJoker.order() > Rank::Two.order());
        assert!(Rank::BigJoker.order() > Rank::SmallJoker.order());
    }

    #[test]
    fn compare_ignores_suit() {
        let a = Card::parse("♠9").unwrap();
        let b = Card::parse("♥9").unwrap();
        assert_eq!(compare(&a, &b), Ordering::Equal);
        assert_eq!(compare(&a, &Card::parse("小王").unwrap()), Ordering::Less);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let hand = vec![
            Card::parse("♦K").unwrap(),
            Card::parse("♠3").unwrap(),
            Card::parse("♥K").unwrap(),
            Card::parse("2").unwrap(),
        ];
        let sorted = sort_ascending(hand);
        assert_eq!(
            sorted,
            vec![
                Card::parse("♠3").unwrap(),
                Card::parse("♦K").unwrap(),
                Card::parse("♥K").unwrap(),
                Card::parse("2").unwrap(),
            ]
        );
        assert_eq!(sort_ascending(sorted.clone()), sorted);
    }

    #[test]
    fn sorted_tokens_is_deterministic() {
        let tokens = vec!["小王".to_string(), "♥4".to_string(), "♠4".to_string()];
        let sorted = sorted_tokens(&tokens).unwrap();
        assert_eq!(sorted, vec!["♠4", "♥4", "小王"]);
        assert!(sorted_tokens(&["♠3".into(), "bogus".into()]).is_err());
    }
}
