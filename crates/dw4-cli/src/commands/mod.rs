pub mod check;
pub mod compile;
pub mod decompile;
pub mod dump;
pub mod io;
pub mod labels;
