/// Ordered list of layers a side is willing to display.
///
/// Order is significant: the first entry found on the map wins. Entries are
/// not deduplicated, and the same layer may appear on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates<L> {
    layers: Vec<L>,
}

impl<L> Default for Candidates<L> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<L> Candidates<L> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn one(layer: L) -> Self {
        Self {
            layers: vec![layer],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn as_slice(&self) -> &[L] {
        &self.layers
    }

    /// First candidate, in order, for which `present` holds.
    pub fn first_present(&self, mut present: impl FnMut(&L) -> bool) -> Option<&L> {
        self.layers.iter().find(|layer| present(layer))
    }
}

impl<L> From<Vec<L>> for Candidates<L> {
    fn from(layers: Vec<L>) -> Self {
        Self { layers }
    }
}

impl<L> From<Option<L>> for Candidates<L> {
    fn from(layer: Option<L>) -> Self {
        Self {
            layers: layer.into_iter().collect(),
        }
    }
}

impl<L, const N: usize> From<[L; N]> for Candidates<L> {
    fn from(layers: [L; N]) -> Self {
        Self {
            layers: layers.into(),
        }
    }
}

impl<L: Clone> From<&[L]> for Candidates<L> {
    fn from(layers: &[L]) -> Self {
        Self {
            layers: layers.to_vec(),
        }
    }
}

impl<L> FromIterator<L> for Candidates<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
