//! Contains all the definition of syntax trees and their parsing logic.

pub mod expression;
pub mod statement;
