use rand::Rng;
use tracing::debug;

use shadowtalk_board::{Board, BoardError, BoardEvent, DilemmaId, Emotion, ReplyId, Target};
use shadowtalk_identity::{next_prompt, random_prompt};

use crate::render;

pub const HELP: &str = "\
Commands:
  post <emotion> <text>        share a dilemma
  select <id>                  focus a dilemma
  show [id]                    show a dilemma and its replies (default: selected)
  draft <text>                 write a reply to the selected dilemma
  send                         send the draft
  reply <id> <text>            reply to a dilemma directly
  token <id> <reply-id>        give an empathy token to a reply
  join <emotion> | leave       enter an emotion room or go back to the lobby
  list | trending              dilemmas in your room, or the top 3 by tokens
  emotions | prompt | whoami   emotion rooms, a new prompt, your id and room
  export                       print the board as JSON
  quit
";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid id")]
    BadId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Post { emotion: String, text: String },
    Select(DilemmaId),
    Show(Option<DilemmaId>),
    Draft(String),
    Send,
    Reply { dilemma_id: DilemmaId, text: String },
    Token { dilemma_id: DilemmaId, reply_id: ReplyId },
    Join(String),
    Leave,
    List,
    Trending,
    Emotions,
    Prompt,
    WhoAmI,
    Export,
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<u64, CommandError> {
    raw.trim_start_matches(['#', 'r'])
        .parse()
        .map_err(|_| CommandError::BadId(raw.to_string()))
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let (verb, rest) = split_word(line);
        if verb.is_empty() {
            return Ok(None);
        }

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "post" => {
                let (emotion, text) = split_word(rest);
                if emotion.is_empty() {
                    return Err(CommandError::Usage("post <emotion> <text>"));
                }
                Command::Post {
                    emotion: emotion.to_string(),
                    text: text.to_string(),
                }
            }
            "select" => {
                let (id, _) = split_word(rest);
                if id.is_empty() {
                    return Err(CommandError::Usage("select <id>"));
                }
                Command::Select(DilemmaId(parse_id(id)?))
            }
            "show" => {
                let (id, _) = split_word(rest);
                if id.is_empty() {
                    Command::Show(None)
                } else {
                    Command::Show(Some(DilemmaId(parse_id(id)?)))
                }
            }
            "draft" => Command::Draft(rest.trim().to_string()),
            "send" => Command::Send,
            "reply" => {
                let (id, text) = split_word(rest);
                if id.is_empty() {
                    return Err(CommandError::Usage("reply <id> <text>"));
                }
                Command::Reply {
                    dilemma_id: DilemmaId(parse_id(id)?),
                    text: text.to_string(),
                }
            }
            "token" => {
                let (dilemma, rest) = split_word(rest);
                let (reply, _) = split_word(rest);
                if dilemma.is_empty() || reply.is_empty() {
                    return Err(CommandError::Usage("token <id> <reply-id>"));
                }
                Command::Token {
                    dilemma_id: DilemmaId(parse_id(dilemma)?),
                    reply_id: ReplyId(parse_id(reply)?),
                }
            }
            "join" => {
                let (emotion, _) = split_word(rest);
                if emotion.is_empty() {
                    return Err(CommandError::Usage("join <emotion>"));
                }
                Command::Join(emotion.to_string())
            }
            "leave" => Command::Leave,
            "list" => Command::List,
            "trending" => Command::Trending,
            "emotions" => Command::Emotions,
            "prompt" => Command::Prompt,
            "whoami" => Command::WhoAmI,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

/// Result of running one input line.
#[derive(Debug, Default)]
pub struct Step {
    pub output: String,
    /// Events committed by the board during this step, for persistence.
    pub events: Vec<BoardEvent>,
    pub quit: bool,
}

/// Line-oriented presentation layer over a [`Board`].
pub struct Shell<R> {
    board: Board,
    draft: Option<String>,
    prompt: &'static str,
    rng: R,
}

impl<R: Rng> Shell<R> {
    pub fn new(board: Board, mut rng: R) -> Self {
        let prompt = random_prompt(&mut rng);
        Self {
            board,
            draft: None,
            prompt,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Length of the pending draft as the board will count it, if there is one.
    pub fn draft_len(&self) -> Option<usize> {
        self.draft.as_deref().map(render::draft_len)
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn banner(&self) -> String {
        render::banner(&self.board, self.prompt)
    }

    pub fn execute(&mut self, line: &str) -> Step {
        let mut step = Step::default();
        match Command::parse(line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => step.quit = true,
            Ok(Some(cmd)) => step.output = self.run(cmd),
            Err(e) => step.output = format!("{}\n", e),
        }

        step.events = self.board.drain_events();
        for event in &step.events {
            self.observe(event);
        }
        step
    }

    /// Any change of selection starts a fresh reply draft.
    fn observe(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::DilemmaSelected { .. }
            | BoardEvent::DilemmaPosted { .. }
            | BoardEvent::RoomJoined { .. }
            | BoardEvent::RoomLeft => {
                if self.draft.take().is_some() {
                    debug!("Discarded reply draft after selection change");
                }
            }
            BoardEvent::ReplyAdded { .. } | BoardEvent::TokenGiven { .. } => {}
        }
    }

    fn run(&mut self, cmd: Command) -> String {
        match self.dispatch(cmd) {
            Ok(out) => out,
            Err(e) => format!("{}\n", e),
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Result<String, BoardError> {
        match cmd {
            Command::Post { emotion, text } => {
                let emotion: Emotion = emotion.parse()?;
                let id = self.board.post_dilemma(&text, Some(emotion))?;
                Ok(format!("Posted #{} in {} {}\n", id, emotion.icon(), emotion.label()))
            }
            Command::Select(id) => {
                // Every select starts a fresh reply, even one the board rejects.
                if self.draft.take().is_some() {
                    debug!("Discarded reply draft on select");
                }
                // Unknown ids cannot come from the listed views, so they stay quiet.
                if let Err(e) = self.board.select_dilemma(id) {
                    debug!("Select ignored: {}", e);
                    return Ok(String::new());
                }
                Ok(self.board.dilemma(id).map(render::dilemma_detail).unwrap_or_default())
            }
            Command::Show(id) => {
                let found = match id {
                    Some(id) => self
                        .board
                        .dilemma(id)
                        .ok_or(BoardError::NotFound(Target::Dilemma(id)))?,
                    None => match self.board.selected_dilemma() {
                        Some(d) => d,
                        None => return Ok("No dilemma selected. Use 'select <id>'.\n".to_string()),
                    },
                };
                Ok(render::dilemma_detail(found))
            }
            Command::Draft(text) => {
                if self.board.selected_id().is_none() {
                    return Ok("Select a dilemma before writing a reply.\n".to_string());
                }
                let out = render::draft_counter(&text);
                self.draft = Some(text);
                Ok(out)
            }
            Command::Send => {
                let Some(dilemma_id) = self.board.selected_id() else {
                    return Ok("Select a dilemma before replying.\n".to_string());
                };
                let text = self.draft.clone().unwrap_or_default();
                let reply_id = self.board.add_reply(dilemma_id, &text)?;
                self.draft = None;
                Ok(format!("Replied to #{} (r{})\n", dilemma_id, reply_id))
            }
            Command::Reply { dilemma_id, text } => {
                let reply_id = self.board.add_reply(dilemma_id, &text)?;
                Ok(format!("Replied to #{} (r{})\n", dilemma_id, reply_id))
            }
            Command::Token { dilemma_id, reply_id } => match self.board.give_token(dilemma_id, reply_id) {
                Ok(total) => Ok(format!("Empathy token given. #{} now has {} in total.\n", dilemma_id, total)),
                Err(e) => {
                    debug!("Token ignored: {}", e);
                    Ok(String::new())
                }
            },
            Command::Join(emotion) => {
                let emotion: Emotion = emotion.parse()?;
                self.board.join_room(emotion);
                Ok(format!("Joined {} {}\n", emotion.icon(), emotion.label()))
            }
            Command::Leave => {
                self.board.leave_room();
                Ok("Back in the lobby.\n".to_string())
            }
            Command::List => {
                let title = match self.board.room() {
                    Some(room) => format!("Dilemmas in {} {}", room.icon(), room.label()),
                    None => "All dilemmas".to_string(),
                };
                Ok(render::dilemma_list(&title, &self.board.visible_dilemmas(), self.board.selected_id()))
            }
            Command::Trending => Ok(render::dilemma_list(
                "Trending",
                &self.board.trending_dilemmas(),
                self.board.selected_id(),
            )),
            Command::Emotions => Ok(render::emotions(&self.board)),
            Command::Prompt => {
                self.prompt = next_prompt(&mut self.rng, self.prompt);
                Ok(format!("Prompt: {}\n", self.prompt))
            }
            Command::WhoAmI => Ok(render::whoami(&self.board)),
            Command::Export => match serde_json::to_string_pretty(&self.board.snapshot()) {
                Ok(json) => Ok(format!("{}\n", json)),
                Err(e) => Ok(format!("Export failed: {}\n", e)),
            },
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }
}
