/// Second line of every fixture, right after the client count.
pub const START: &str = "o";

/// Closes the record section.
pub const END_OF_INPUT: &str = ".";

/// Last line of every fixture.
pub const TERMINATE: &str = "x";
