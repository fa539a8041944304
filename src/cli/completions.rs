use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    packsmith completions bash > ~/.bash_completion.d/packsmith\n\n\
                  Generate zsh completions:\n    packsmith completions zsh > ~/.zfunc/_packsmith\n\n\
                  Generate fish completions:\n    packsmith completions fish > ~/.config/fish/completions/packsmith.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
