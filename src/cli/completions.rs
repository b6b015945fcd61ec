use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    chesscast completions bash > ~/.bash_completion.d/chesscast\n\n\
                  Generate zsh completions:\n    chesscast completions zsh > ~/.zfunc/_chesscast\n\n\
                  Generate fish completions:\n    chesscast completions fish > ~/.config/fish/completions/chesscast.fish\n\n\
                  Generate PowerShell completions:\n    chesscast completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
