pub mod roster;

pub use roster::{names_in_column, NameSet, Registrant, RegistrantSet, Table};
