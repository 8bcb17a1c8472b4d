//! RAT24F grammar tables: reserved words, productions, and FIRST-set dispatch

pub mod dispatch;
pub mod keywords;
pub mod productions;

pub use dispatch::{
    continues_statement_list, AdditiveOperator, FactorForm, MultiplicativeOperator, Qualifier,
    RelationalOperator, StatementForm,
};
pub use keywords::{is_reserved_keyword, Keyword};
pub use productions::Production;
