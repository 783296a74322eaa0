use std::fmt::Write;

use shadowtalk_board::{Board, Dilemma, DilemmaId, Emotion, MAX_REPLY_LENGTH};

/// Longest text preview shown in list views, in characters.
const PREVIEW_LEN: usize = 60;

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LEN {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(PREVIEW_LEN - 1).collect();
    cut.push('…');
    cut
}

fn count(n: u64, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

fn room_label(room: Option<Emotion>) -> String {
    match room {
        Some(e) => format!("{} {}", e.icon(), e.label()),
        None => "lobby".to_string(),
    }
}

/// One line per dilemma. The selected one is marked with `>`.
pub fn dilemma_list(title: &str, dilemmas: &[&Dilemma], selected: Option<DilemmaId>) -> String {
    let mut out = format!("{}\n", title);
    if dilemmas.is_empty() {
        out.push_str("  (nothing here yet)\n");
        return out;
    }
    for d in dilemmas {
        let marker = if Some(d.id()) == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} #{} {} {} | {} | {} | {}",
            marker,
            d.id(),
            d.emotion().icon(),
            d.emotion().label(),
            count(d.replies().len() as u64, "reply", "replies"),
            count(d.total_tokens(), "token", "tokens"),
            preview(d.text()),
        );
    }
    out
}

/// A dilemma with its whole reply thread.
pub fn dilemma_detail(d: &Dilemma) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} {} {} by {} at {}",
        d.id(),
        d.emotion().icon(),
        d.emotion().label(),
        d.author_id(),
        d.created_at().format("%Y-%m-%d %H:%M UTC"),
    );
    let _ = writeln!(out, "  {}", d.text());
    let _ = writeln!(out, "  {} in total", count(d.total_tokens(), "empathy token", "empathy tokens"));
    if d.replies().is_empty() {
        out.push_str("  no replies yet\n");
    }
    for r in d.replies() {
        let _ = writeln!(
            out,
            "    [r{}] ({}) {}: {}",
            r.id(),
            count(r.tokens(), "token", "tokens"),
            r.author_id(),
            r.text(),
        );
    }
    out
}

pub fn emotions(board: &Board) -> String {
    let mut out = String::from("Emotion rooms:\n");
    for e in Emotion::ALL {
        let n = board.count_in(e) as u64;
        let _ = writeln!(
            out,
            "  {} {:<12} ({}) {}",
            e.icon(),
            e.label(),
            e.id(),
            count(n, "dilemma", "dilemmas")
        );
    }
    out
}

/// Character count of a reply draft, measured the way the board measures replies.
pub fn draft_len(text: &str) -> usize {
    text.trim().chars().count()
}

pub fn draft_counter(text: &str) -> String {
    let len = draft_len(text);
    if len > MAX_REPLY_LENGTH {
        format!("Draft: {}/{} characters (too long to send)\n", len, MAX_REPLY_LENGTH)
    } else {
        format!("Draft: {}/{} characters\n", len, MAX_REPLY_LENGTH)
    }
}

pub fn whoami(board: &Board) -> String {
    format!(
        "Your anonymous id: {}\nRoom: {}\n",
        board.anon_id(),
        room_label(board.room())
    )
}

pub fn banner(board: &Board, prompt: &str) -> String {
    format!(
        "ShadowTalk: speak freely, stay anonymous.\n{}Prompt: {}\nType 'help' for commands.\n",
        whoami(board),
        prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowtalk_board::AuthorId;

    #[test]
    fn emotions_show_per_room_counts() {
        let mut b = Board::new(AuthorId::new("shadow-test01"), None);
        b.post_dilemma("one", Some(Emotion::Confused)).unwrap();
        let out = emotions(&b);
        assert!(out.contains("(confused) 1 dilemma\n"));
        assert!(out.contains("(angry) 0 dilemmas\n"));
        assert_eq!(out.lines().count(), Emotion::ALL.len() + 1);
    }

    #[test]
    fn draft_counter_uses_trimmed_chars() {
        assert_eq!(draft_len("  héllo  "), 5);
        assert_eq!(draft_counter(&"é".repeat(200)), "Draft: 200/200 characters\n");
        assert!(draft_counter(&"a".repeat(201)).ends_with("(too long to send)\n"));
    }

    #[test]
    fn long_text_is_previewed() {
        let text = "x".repeat(100);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_LEN);
        assert!(p.ends_with('…'));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn list_marks_selection_and_counts() {
        let mut board = Board::new(AuthorId::new("shadow-abc123"), None);
        let id = board.post_dilemma("Should I move out?", Some(Emotion::Stressed)).unwrap();
        let reply = board.add_reply(id, "Only if you can afford it").unwrap();
        board.give_token(id, reply).unwrap();

        let out = dilemma_list("Dilemmas", &board.visible_dilemmas(), board.selected_id());
        assert!(out.contains(&format!("> #{}", id)));
        assert!(out.contains("1 reply |"));
        assert!(out.contains("1 token |"));

        let detail = dilemma_detail(board.dilemma(id).unwrap());
        assert!(detail.contains(&format!("[r{}] (1 token) shadow-abc123: Only if you can afford it", reply)));
    }

    #[test]
    fn empty_list_says_so() {
        let out = dilemma_list("Trending", &[], None);
        assert!(out.contains("nothing here yet"));
    }
}
