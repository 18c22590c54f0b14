pub(crate) mod args;
pub(crate) mod prompt;

pub(crate) use args::Cli;
pub(crate) use prompt::Prompter;
