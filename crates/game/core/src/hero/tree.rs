//! The hero's fixed priority tree.
//!
//! ```text
//! Selector
//!  ├─ Sequence: needs_healing → drink_potion
//!  ├─ Sequence: enemies_present → fight
//!  ├─ Sequence: loot_present → loot
//!  └─ Sequence: explore
//! ```

use behavior_tree::builder::{action, condition, selector, sequence};
use behavior_tree::Node;

use super::HeroContext;
use super::nodes::{actions, conditions};

pub fn hero_tree<'w>() -> Node<HeroContext<'w>> {
    selector(vec![
        sequence(vec![
            condition("needs_healing", conditions::needs_healing),
            action("drink_potion", actions::drink_potion),
        ]),
        sequence(vec![
            condition("enemies_present", conditions::enemies_present),
            action("fight", actions::fight),
        ]),
        sequence(vec![
            condition("loot_present", conditions::loot_present),
            action("loot", actions::loot),
        ]),
        sequence(vec![action("explore", actions::explore)]),
    ])
}
