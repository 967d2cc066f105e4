//! Terminal output for swiftly: styled messages, spinners, download
//! progress, and y/n prompts.

pub mod output;
pub mod printer;
pub mod prompt;
pub mod spinner;
pub mod style;

pub use output::Output;
pub use printer::Printer;
pub use prompt::{Prompt, ScriptedPrompt, StdinPrompt, confirm};
pub use spinner::{Progress, Spinner};
pub use style::Style;
