pub mod is_elevated;
