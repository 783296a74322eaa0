/// End-to-end behaviour of the board through its public API:
/// posting, room membership, replies, tokens, and the derived views.

use shadowtalk_board::{
    AuthorId, Board, BoardError, BoardEvent, DilemmaId, Emotion, MAX_REPLY_LENGTH, ReplyId,
    TRENDING_LIMIT, Target,
};

fn lobby_board() -> Board {
    Board::new(AuthorId::new("shadow-k3x9qa"), None)
}

#[test]
fn post_creates_selected_empty_dilemma() {
    let mut board = lobby_board();
    for (i, emotion) in Emotion::ALL.into_iter().enumerate() {
        let before = board.len();
        let id = board.post_dilemma(&format!("dilemma {}", i), Some(emotion)).unwrap();

        assert_eq!(board.len(), before + 1);
        assert_eq!(board.selected_id(), Some(id));
        let d = board.selected_dilemma().unwrap();
        assert_eq!(d.total_tokens(), 0);
        assert!(d.replies().is_empty());
        assert_eq!(d.emotion(), emotion);
    }
}

#[test]
fn blank_or_emotionless_post_changes_nothing() {
    let mut board = lobby_board();
    for text in ["", "   ", "\n\t "] {
        assert_eq!(board.post_dilemma(text, Some(Emotion::Confused)), Err(BoardError::EmptyInput));
    }
    assert_eq!(board.post_dilemma("real text", None), Err(BoardError::EmptyInput));

    assert!(board.is_empty());
    assert_eq!(board.room(), None);
    assert_eq!(board.selected_id(), None);
}

#[test]
fn reply_requires_matching_room() {
    let mut board = Board::new(AuthorId::new("shadow-k3x9qa"), Some("angry"));
    let lonely = board.post_dilemma("Nobody calls me back", Some(Emotion::Lonely)).unwrap();

    assert_eq!(
        board.add_reply(lonely, "I hear you"),
        Err(BoardError::RoomMismatch {
            room: Some(Emotion::Angry),
            required: Emotion::Lonely,
        })
    );
    assert!(board.dilemma(lonely).unwrap().replies().is_empty());

    board.join_room(Emotion::Lonely);
    let reply = board.add_reply(lonely, "I hear you").unwrap();
    let d = board.dilemma(lonely).unwrap();
    assert_eq!(d.replies().len(), 1);
    assert_eq!(d.reply(reply).unwrap().tokens(), 0);
    assert_eq!(d.reply(reply).unwrap().author_id().as_str(), "shadow-k3x9qa");
}

#[test]
fn reply_in_lobby_is_room_mismatch() {
    let mut board = Board::with_room(AuthorId::new("shadow-k3x9qa"), Some(Emotion::Angry));
    let id = board.post_dilemma("ugh", Some(Emotion::Angry)).unwrap();
    board.leave_room();

    assert_eq!(
        board.add_reply(id, "same"),
        Err(BoardError::RoomMismatch { room: None, required: Emotion::Angry })
    );
}

#[test]
fn reply_length_boundary() {
    let mut board = lobby_board();
    let id = board.post_dilemma("How do I say no?", Some(Emotion::Stressed)).unwrap();

    let exact = "a".repeat(MAX_REPLY_LENGTH);
    assert!(board.add_reply(id, &exact).is_ok());

    let over = "a".repeat(MAX_REPLY_LENGTH + 1);
    assert_eq!(
        board.add_reply(id, &over),
        Err(BoardError::ReplyTooLong { len: 201, max: 200 })
    );

    // Surrounding whitespace does not count against the limit.
    let padded = format!("   {}   ", exact);
    assert!(board.add_reply(id, &padded).is_ok());
    assert_eq!(board.dilemma(id).unwrap().replies().len(), 2);
}

#[test]
fn blank_reply_is_empty_input() {
    let mut board = lobby_board();
    let id = board.post_dilemma("hmm", Some(Emotion::Confused)).unwrap();
    assert_eq!(board.add_reply(id, "    "), Err(BoardError::EmptyInput));
    assert_eq!(
        board.add_reply(DilemmaId(999), "hello"),
        Err(BoardError::NotFound(Target::Dilemma(DilemmaId(999))))
    );
}

#[test]
fn tokens_accumulate_and_total_is_sum() {
    let mut board = lobby_board();
    let id = board.post_dilemma("Tell my boss?", Some(Emotion::Stressed)).unwrap();
    let first = board.add_reply(id, "Yes").unwrap();
    let second = board.add_reply(id, "Not yet").unwrap();

    board.give_token(id, second).unwrap();
    for _ in 0..3 {
        board.give_token(id, first).unwrap();
    }

    let d = board.dilemma(id).unwrap();
    assert_eq!(d.reply(first).unwrap().tokens(), 3);
    assert_eq!(d.reply(second).unwrap().tokens(), 1);
    assert_eq!(d.total_tokens(), 4);
    let sum: u64 = d.replies().iter().map(|r| r.tokens()).sum();
    assert_eq!(d.total_tokens(), sum);
}

#[test]
fn token_with_unknown_ids_is_noop() {
    let mut board = lobby_board();
    let id = board.post_dilemma("x", Some(Emotion::Angry)).unwrap();
    let reply = board.add_reply(id, "y").unwrap();

    assert!(matches!(board.give_token(DilemmaId(77), reply), Err(BoardError::NotFound(_))));
    assert!(matches!(board.give_token(id, ReplyId(77)), Err(BoardError::NotFound(_))));
    assert_eq!(board.dilemma(id).unwrap().total_tokens(), 0);
}

#[test]
fn trending_picks_top_three_by_tokens() {
    let mut board = lobby_board();
    let mut ids = Vec::new();
    // Posted oldest to newest with token counts 5, 1, 9, 3.
    for (text, tokens) in [("five", 5), ("one", 1), ("nine", 9), ("three", 3)] {
        let id = board.post_dilemma(text, Some(Emotion::Confused)).unwrap();
        let reply = board.add_reply(id, "here for you").unwrap();
        for _ in 0..tokens {
            board.give_token(id, reply).unwrap();
        }
        ids.push(id);
    }

    let trending: Vec<u64> = board.trending_dilemmas().iter().map(|d| d.total_tokens()).collect();
    assert_eq!(trending, vec![9, 5, 3]);
    assert!(board.trending_dilemmas().len() <= TRENDING_LIMIT);
    assert_eq!(board.trending_dilemmas()[0].id(), ids[2]);
}

#[test]
fn join_filters_visible_in_newest_first_order() {
    let mut board = lobby_board();
    let a1 = board.post_dilemma("a1", Some(Emotion::Angry)).unwrap();
    let l1 = board.post_dilemma("l1", Some(Emotion::Lonely)).unwrap();
    let a2 = board.post_dilemma("a2", Some(Emotion::Angry)).unwrap();
    let l2 = board.post_dilemma("l2", Some(Emotion::Lonely)).unwrap();

    let all: Vec<DilemmaId> = board.dilemmas().map(|d| d.id()).collect();
    assert_eq!(all, vec![l2, a2, l1, a1]);

    board.join_room(Emotion::Lonely);
    let visible: Vec<DilemmaId> = board.visible_dilemmas().iter().map(|d| d.id()).collect();
    assert_eq!(visible, vec![l2, l1]);

    board.join_room(Emotion::Angry);
    let visible: Vec<DilemmaId> = board.visible_dilemmas().iter().map(|d| d.id()).collect();
    assert_eq!(visible, vec![a2, a1]);

    board.join_room(Emotion::Embarrassed);
    assert!(board.visible_dilemmas().is_empty());
}

#[test]
fn leave_room_shows_everything() {
    let mut board = lobby_board();
    board.post_dilemma("a", Some(Emotion::Angry)).unwrap();
    board.post_dilemma("b", Some(Emotion::Lonely)).unwrap();
    board.post_dilemma("c", Some(Emotion::Stressed)).unwrap();
    assert_eq!(board.visible_dilemmas().len(), 1);

    board.leave_room();
    assert_eq!(board.room(), None);
    assert_eq!(board.visible_dilemmas().len(), 3);
}

#[test]
fn first_post_joins_room_once() {
    let mut board = lobby_board();
    board.post_dilemma("first", Some(Emotion::Embarrassed)).unwrap();
    assert_eq!(board.room(), Some(Emotion::Embarrassed));

    board.post_dilemma("second", Some(Emotion::Angry)).unwrap();
    assert_eq!(board.room(), Some(Emotion::Embarrassed));

    let joins = board
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, BoardEvent::RoomJoined { .. }))
        .count();
    assert_eq!(joins, 1);
}

#[test]
fn select_unknown_keeps_selection() {
    let mut board = lobby_board();
    let id = board.post_dilemma("keep me", Some(Emotion::Confused)).unwrap();

    assert_eq!(
        board.select_dilemma(DilemmaId(12345)),
        Err(BoardError::NotFound(Target::Dilemma(DilemmaId(12345))))
    );
    assert_eq!(board.selected_id(), Some(id));

    board.leave_room();
    assert!(board.select_dilemma(DilemmaId(12345)).is_err());
    assert_eq!(board.selected_id(), None);
}

#[test]
fn select_can_focus_dilemma_outside_room() {
    let mut board = lobby_board();
    let angry = board.post_dilemma("a", Some(Emotion::Angry)).unwrap();
    board.join_room(Emotion::Lonely);

    board.select_dilemma(angry).unwrap();
    assert_eq!(board.selected_dilemma().map(|d| d.id()), Some(angry));
    assert!(matches!(
        board.add_reply(angry, "hi"),
        Err(BoardError::RoomMismatch { .. })
    ));
}
