use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wire names are the server's Chinese role strings, also used as JSON
/// object keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seat {
    #[serde(rename = "地主")]
    Landlord,
    #[serde(rename = "农民甲")]
    FarmerA,
    #[serde(rename = "农民乙")]
    FarmerB,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::Landlord, Seat::FarmerA, Seat::FarmerB];

    pub fn wire_name(self) -> &'static str {
        match self {
            Seat::Landlord => "地主",
            Seat::FarmerA => "农民甲",
            Seat::FarmerB => "农民乙",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Seat::Landlord => "landlord",
            Seat::FarmerA => "farmer-A",
            Seat::FarmerB => "farmer-B",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    Human,
    Ai,
}

/// Who controls each seat; fixed for the lifetime of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SeatAssignments {
    kinds: BTreeMap<Seat, SeatKind>,
}

impl SeatAssignments {
    pub fn new(landlord: SeatKind, farmer_a: SeatKind, farmer_b: SeatKind) -> Self {
        let mut kinds = BTreeMap::new();
        kinds.insert(Seat::Landlord, landlord);
        kinds.insert(Seat::FarmerA, farmer_a);
        kinds.insert(Seat::FarmerB, farmer_b);
        Self { kinds }
    }

    pub fn kind(&self, seat: Seat) -> SeatKind {
        self.kinds[&seat]
    }

    pub fn is_human(&self, seat: Seat) -> bool {
        self.kind(seat) == SeatKind::Human
    }

    pub fn human_count(&self) -> usize {
        Seat::ALL.iter().filter(|seat| self.is_human(**seat)).count()
    }
}

impl Default for SeatAssignments {
    fn default() -> Self {
        Self::new(SeatKind::Human, SeatKind::Ai, SeatKind::Ai)
    }
}
