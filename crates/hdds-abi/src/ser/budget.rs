// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode allocation budget.
//!
//! A single [`Budget`] is created per top-level decode and passed by `&mut`
//! into every nested decoder. Each decoder charges the bytes it reads before
//! reading them, so a list of lists of lists is bounded by the one top-level
//! figure rather than by a fresh budget per nesting level.
//!
//! The budget also tracks list/record nesting. A level costs only a handful
//! of bytes, so the byte figure alone does not bound recursion.

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{AbiError, Result};

/// Remaining number of bytes a decode operation may consume, plus the
/// current nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    remaining: usize,
    depth: usize,
    max_depth: usize,
}

impl Budget {
    /// Byte budget with the default depth limit.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            remaining: max_bytes,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Enter one list or record level.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            log::debug!("[abi] nesting depth exceeds {}", self.max_depth);
            return Err(AbiError::DepthExceeded {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a level entered with [`Budget::enter`].
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Charge `n` bytes. Fails without charging anything if `n` exceeds what
    /// is left.
    pub fn consume(&mut self, n: usize) -> Result<()> {
        if n > self.remaining {
            log::debug!(
                "[abi] budget exceeded: need {} bytes, {} remaining",
                n,
                self.remaining
            );
            return Err(AbiError::BudgetExceeded {
                needed: n,
                remaining: self.remaining,
            });
        }
        self.remaining -= n;
        Ok(())
    }

    /// Reject a declared element count before anything is allocated for it.
    ///
    /// Every element costs at least one byte, so a count larger than the
    /// remaining budget can never be satisfied.
    pub fn check_count(&self, count: usize) -> Result<()> {
        if count > self.remaining {
            log::debug!(
                "[abi] declared count {} exceeds remaining budget {}",
                count,
                self.remaining
            );
            return Err(AbiError::BudgetExceeded {
                needed: count,
                remaining: self.remaining,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_consume_until_exhausted() {
        let mut budget = Budget::new(10);
        budget.consume(4).expect("consume 4");
        budget.consume(6).expect("consume 6");
        assert!(budget.is_exhausted());

        match budget.consume(1) {
            Err(AbiError::BudgetExceeded { needed, remaining }) => {
                assert_eq!(needed, 1);
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_budget_failed_consume_charges_nothing() {
        let mut budget = Budget::new(5);
        assert!(budget.consume(6).is_err());
        assert_eq!(budget.remaining(), 5);
    }

    #[test]
    fn test_budget_depth() {
        let mut budget = Budget::new(10).with_max_depth(2);
        budget.enter().expect("level 1");
        budget.enter().expect("level 2");
        assert!(matches!(
            budget.enter(),
            Err(AbiError::DepthExceeded { max: 2 })
        ));
        assert_eq!(budget.depth(), 2);

        budget.leave();
        budget.enter().expect("sibling at level 2");
        budget.leave();
        budget.leave();
        assert_eq!(budget.depth(), 0);
        assert_eq!(budget.remaining(), 10);
    }

    #[test]
    fn test_budget_check_count() {
        let budget = Budget::new(3);
        budget.check_count(0).expect("zero count");
        budget.check_count(3).expect("count equal to budget");
        assert!(budget.check_count(4).is_err());
        assert!(budget.check_count(u32::MAX as usize).is_err());
    }
}
