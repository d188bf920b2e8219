//! Interactive terminal client for the research-advisor chat service.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a service on http://localhost:5000
//! advisor-chat
//!
//! # Point at another server and skip the mode prompt
//! advisor-chat --base-url http://10.0.0.2:5000 --mode references
//!
//! # Disable colors (useful for piping output)
//! advisor-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/mode idea|references` - Choose the input mode
//! - `/attach <path>` - Attach a file to the next message
//! - `/detach <name>` - Remove an attached file
//! - `/files` - List attached files
//! - `/send` - Send attached files without text
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use advisor_chat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use advisor_chat::{ChatClient, SelectedFile};

/// Main entry point for the advisor-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("advisor-chat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;
    let use_color = config.use_color;

    let client = ChatClient::with_options(config.base_url.clone(), Some(config.timeout))?;
    println!("Advisor Chat ({})", client.endpoint());
    println!("Type /help for commands, /quit to exit\n");

    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    let mut pending = session.start(&mut renderer);

    loop {
        // The check runs on a worker thread; report it at the next prompt.
        if pending
            .as_mut()
            .is_some_and(|probe| probe.try_report(&mut renderer).is_some())
        {
            pending = None;
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Mode(mode) => {
                            if !session.select_mode(mode, &mut renderer) {
                                renderer.print_error(&format!(
                                    "The input mode is already set to {}.",
                                    session.mode()
                                ));
                            }
                        }
                        ChatCommand::Attach(path) => match SelectedFile::from_path(&path) {
                            Ok(file) => {
                                let name = file.name().to_string();
                                if !session.add_file(file, &mut renderer) {
                                    renderer.print_info(&format!("{name} is already attached."));
                                }
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Detach(name) => {
                            if !session.remove_file(&name, &mut renderer) {
                                renderer.print_error(&format!("No attached file named {name}."));
                            }
                        }
                        ChatCommand::Files => {
                            if session.selected_file_count() == 0 {
                                renderer.print_info("No files attached.");
                            }
                            for file in session.selected_files() {
                                renderer
                                    .print_info(&format!("  {} ({})", file.name(), file.display_size()));
                            }
                        }
                        ChatCommand::Send => {
                            session.send("", &mut renderer).await;
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                session.send(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
