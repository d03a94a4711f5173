//! Running aquifer / leaky-layer numbers for cross-section labels

use crate::model::LayerType;

/// Two independent label counters walked alongside the layer stack
///
/// The aquifer counter starts at 0. The leaky counter starts at 1 when the
/// stack begins with an aquifer (leaky layer `i` sits on top of aquifer `i`)
/// and at 0 otherwise. A counter only advances after a layer of its own type
/// received a label or a parameter annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerIndexer {
    aquifer: usize,
    leaky: usize,
}

impl LayerIndexer {
    pub fn new(ltype: &[LayerType]) -> Self {
        let leaky = usize::from(ltype.first() == Some(&LayerType::Aquifer));
        Self { aquifer: 0, leaky }
    }

    /// Index of the next annotated aquifer
    pub fn aquifer(&self) -> usize {
        self.aquifer
    }

    /// Index of the next annotated leaky layer
    pub fn leaky(&self) -> usize {
        self.leaky
    }

    /// Current index for a layer of type `ltype`
    pub fn current(&self, ltype: LayerType) -> usize {
        match ltype {
            LayerType::Aquifer => self.aquifer,
            LayerType::Leaky => self.leaky,
        }
    }

    /// Step past a rendered layer
    pub fn advance(&mut self, ltype: LayerType, annotated: bool) {
        if !annotated {
            return;
        }
        match ltype {
            LayerType::Aquifer => self.aquifer += 1,
            LayerType::Leaky => self.leaky += 1,
        }
    }
}
