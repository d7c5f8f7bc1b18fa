//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so that the
//! service layer never deals with database structures directly.

pub mod giveaway;
pub mod giveaway_settings;

#[cfg(test)]
mod test;
