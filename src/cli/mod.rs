use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP chat server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Use a canned completion client instead of the OpenAI API
        #[arg(long)]
        mock_llm: bool,
    },

    /// Start an interactive terminal chat against a running server
    Chat {
        /// Base URL of the chat server
        #[arg(long, default_value = "http://localhost:3000")]
        url: String,
    },
}
