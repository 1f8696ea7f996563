//! End-to-end tests over the table reducer: turn cycling, undo, the pirate
//! counter, the alchemist one-shot, and the documented quirks around game
//! archiving and undo.

use smallvec::smallvec;

use rollatron_rs::game::{DiceValues, GameConfig, GameState, PIRATE_ATTACK_THRESHOLD, RollEvent};

fn table(names: &[&str]) -> GameState {
    let mut state = GameState::new(GameConfig { seed: Some(7) });
    state.start_new_game(names.iter().copied());
    state
}

#[test]
fn turns_cycle_and_rounds_increment_on_wrap() {
    let mut state = table(&["Alice", "Bob", "Carol"]);
    assert_eq!(state.round, 1);
    assert_eq!(state.current_player_index, 0);

    for expected in [1, 2] {
        state.next_turn().unwrap();
        assert_eq!(state.current_player_index, expected);
        assert_eq!(state.round, 1);
    }
    state.next_turn().unwrap();
    assert_eq!(state.current_player_index, 0);
    assert_eq!(state.round, 2);

    // a second full cycle bumps the round exactly once more
    for _ in 0..3 {
        state.next_turn().unwrap();
    }
    assert_eq!(state.round, 3);
}

#[test]
fn undo_restores_the_four_snapshot_fields() {
    let mut state = table(&["Alice", "Bob"]);
    state.add_roll(smallvec![2, 3]).unwrap();
    state.next_turn().unwrap();

    let index_before = state.current_player_index;
    let round_before = state.round;
    let history_before = state.roll_history.clone();
    let pirate_before = state.pirate_count;

    state.add_roll(smallvec![4, 3]).unwrap();
    state.next_turn().unwrap();
    assert_eq!(state.roll_history.len(), 2);

    state.undo_last_roll();
    // the snapshot predates the second roll and the next_turn that followed
    assert_eq!(state.current_player_index, index_before);
    assert_eq!(state.round, round_before);
    assert_eq!(state.roll_history, history_before);
    assert_eq!(state.pirate_count, pirate_before);
    assert!(!state.has_undo());

    // a second consecutive undo is a no-op
    let snapshot = state.roll_history.clone();
    state.undo_last_roll();
    assert_eq!(state.roll_history, snapshot);
    assert_eq!(state.current_player_index, index_before);
}

#[test]
fn undo_does_not_rewind_the_open_games_roll_list() {
    // Documented inconsistency: the session history rolls back, the open
    // game's own list does not.
    let mut state = table(&["Alice"]);
    state.add_roll(smallvec![5, 5]).unwrap();
    state.undo_last_roll();

    assert!(state.roll_history.is_empty());
    let game = state.current_game.as_ref().unwrap();
    assert_eq!(game.rolls.len(), 1);
}

#[test]
fn pirate_counter_counts_event_faces_above_three() {
    let mut state = table(&["Alice"]);
    state.toggle_third_die();

    state.add_roll(smallvec![1, 2, 6]).unwrap();
    assert_eq!(state.pirate_count, 1);
    state.add_roll(smallvec![1, 2, 3]).unwrap();
    assert_eq!(state.pirate_count, 1);
    state.add_roll(smallvec![1, 2, 4]).unwrap();
    assert_eq!(state.pirate_count, 2);
}

#[test]
fn pirate_counter_wraps_after_the_attack() {
    let mut state = table(&["Alice"]);
    state.toggle_third_die();
    state.pirate_count = 7;

    let outcome = state.add_roll(smallvec![1, 1, 6]).unwrap();
    assert_eq!(state.pirate_count, PIRATE_ATTACK_THRESHOLD);
    assert!(outcome.events.contains(&RollEvent::PirateAttack));
    assert_eq!(outcome.roll.pirate_count, 8);

    // the next qualifying roll resets first, then counts itself
    let outcome = state.add_roll(smallvec![1, 1, 6]).unwrap();
    assert_eq!(state.pirate_count, 1);
    assert!(!outcome.events.contains(&RollEvent::PirateAttack));
}

#[test]
fn pirate_counter_untouched_without_third_die() {
    let mut state = table(&["Alice"]);
    state.pirate_count = 3;
    state.add_roll(smallvec![1, 1, 6]).unwrap();
    assert_eq!(state.pirate_count, 3);
}

#[test]
fn toggling_the_third_die_always_resets_the_counter() {
    let mut state = table(&["Alice"]);
    state.toggle_third_die();
    state.add_roll(smallvec![1, 1, 5]).unwrap();
    assert_eq!(state.pirate_count, 1);

    // turning the feature off also zeroes it
    state.toggle_third_die();
    assert!(!state.third_die_enabled);
    assert_eq!(state.pirate_count, 0);
}

#[test]
fn pirate_progress_is_a_percentage() {
    let mut state = table(&["Alice"]);
    assert_eq!(state.pirate_progress(), 0.0);
    state.pirate_count = 4;
    assert_eq!(state.pirate_progress(), 50.0);
    state.pirate_count = 8;
    assert_eq!(state.pirate_progress(), 100.0);
    state.reset_pirate_count();
    assert_eq!(state.pirate_progress(), 0.0);
}

#[test]
fn alchemist_pins_exactly_one_roll() {
    let mut state = table(&["Alice"]);
    state.toggle_third_die();
    state.set_alchemist((6, 6), false).unwrap();

    let values = state.roll_values();
    assert_eq!(&values[..2], &[6, 6]);
    assert_eq!(values.len(), 3);

    let outcome = state.add_roll(values).unwrap();
    assert!(outcome.events.contains(&RollEvent::AlchemistConsumed));
    assert!(!state.alchemist.is_active);
    assert_eq!(state.alchemist.preset_values, (1, 1));

    // with the preset gone the resource dice are random again
    let mut saw_other = false;
    for _ in 0..10 {
        let values = state.roll_values();
        assert_eq!(values.len(), 3);
        if values[..2] != [6, 6] {
            saw_other = true;
        }
    }
    assert!(saw_other);
}

#[test]
fn alchemist_is_cleared_even_when_explicitly_cancelled() {
    let mut state = table(&["Alice"]);
    state.set_alchemist((2, 5), true).unwrap();
    state.clear_alchemist();
    assert!(!state.alchemist.is_active);
    assert!(!state.alchemist.highlight_second_die);
    assert_eq!(state.roll_values().len(), 2);
}

#[test]
fn rolls_are_stamped_with_player_round_and_pirate_count() {
    let mut state = table(&["Alice", "Bob"]);
    state.toggle_third_die();

    let outcome = state.add_roll(smallvec![3, 4, 5]).unwrap();
    state.next_turn().unwrap();
    assert_eq!(outcome.roll.player, "Alice");
    assert_eq!(outcome.roll.round, 1);
    assert_eq!(outcome.roll.pirate_count, 1);
    assert!(outcome.events.contains(&RollEvent::Robber));

    let outcome = state.add_roll(smallvec![1, 2, 1]).unwrap();
    assert_eq!(outcome.roll.player, "Bob");
    assert_eq!(outcome.roll.round, 1);
}

#[test]
fn rolls_land_in_both_histories() {
    let mut state = table(&["Alice"]);
    state.add_roll(smallvec![2, 2]).unwrap();
    state.add_roll(smallvec![3, 3]).unwrap();

    assert_eq!(state.roll_history.len(), 2);
    // most-recent-first in both lists
    assert_eq!(state.roll_history[0].resource_sum(), 6);
    let game = state.current_game.as_ref().unwrap();
    assert_eq!(game.rolls.len(), 2);
    assert_eq!(game.rolls[0].id, state.roll_history[0].id);
}

#[test]
fn clear_history_leaves_games_alone() {
    let mut state = table(&["Alice"]);
    state.add_roll(smallvec![2, 2]).unwrap();
    state.clear_history();

    assert!(state.roll_history.is_empty());
    assert_eq!(state.current_game.as_ref().unwrap().rolls.len(), 1);
}

#[test]
fn ending_a_game_archives_it_and_clears_the_roster() {
    let mut state = table(&["Alice", "Bob"]);
    state.add_roll(smallvec![2, 3]).unwrap();
    let game_id = state.current_game.as_ref().unwrap().id;

    state.end_current_game();
    assert!(state.current_game.is_none());
    assert!(state.players.is_empty());
    assert_eq!(state.games.len(), 1);
    assert_eq!(state.games[0].id, game_id);
    assert!(!state.games[0].is_open());
    assert!(state.games[0].duration_ms().is_some());
    // session history deliberately survives
    assert_eq!(state.roll_history.len(), 1);

    // no-op without an open game
    state.end_current_game();
    assert_eq!(state.games.len(), 1);
}

#[test]
fn starting_over_an_open_game_discards_it() {
    // Documented quirk: the open game is dropped, not archived.
    let mut state = table(&["Alice"]);
    state.add_roll(smallvec![2, 3]).unwrap();
    let first_id = state.current_game.as_ref().unwrap().id;

    state.start_new_game(["Dana", "Eve"]);
    assert!(state.games.is_empty());
    let game = state.current_game.as_ref().unwrap();
    assert_ne!(game.id, first_id);
    assert!(game.rolls.is_empty());
    assert_eq!(state.players.len(), 2);
    assert_eq!(state.players[0].name, "Dana");
    assert_eq!(state.round, 1);
    assert_eq!(state.current_player_index, 0);
    assert!(state.roll_history.is_empty());
}

#[test]
fn roster_edits_do_not_touch_the_game_snapshot() {
    let mut state = table(&["Alice", "Bob"]);
    state.add_player("Carol");
    assert_eq!(state.players.len(), 3);
    assert_eq!(state.current_game.as_ref().unwrap().players.len(), 2);

    let carol = state.players[2].id;
    state.remove_player(carol);
    assert_eq!(state.players.len(), 2);

    let mut reversed = state.players.clone();
    reversed.reverse();
    state.reorder_players(reversed);
    assert_eq!(state.players[0].name, "Bob");
    assert_eq!(state.current_game.as_ref().unwrap().players[0].name, "Alice");
}

#[test]
fn reset_returns_the_documented_initial_state() {
    let mut state = table(&["Alice", "Bob"]);
    state.toggle_third_die();
    state.add_roll(smallvec![4, 3, 6]).unwrap();
    state.next_turn().unwrap();
    state.set_alchemist((6, 6), true).unwrap();
    state.end_current_game();

    state.reset();
    assert!(state.players.is_empty());
    assert_eq!(state.current_player_index, 0);
    assert_eq!(state.round, 1);
    assert!(!state.third_die_enabled);
    assert!(state.roll_history.is_empty());
    assert!(state.games.is_empty());
    assert!(state.current_game.is_none());
    assert_eq!(state.pirate_count, 0);
    assert!(!state.alchemist.is_active);
    assert!(!state.has_undo());
}

#[test]
fn generated_rolls_feed_straight_into_the_reducer() {
    let mut state = table(&["Alice", "Bob", "Carol"]);
    state.toggle_third_die();

    for _ in 0..30 {
        let values: DiceValues = state.roll_values();
        assert_eq!(values.len(), 3);
        state.add_roll(values).unwrap();
        state.next_turn().unwrap();
    }
    assert_eq!(state.roll_history.len(), 30);
    assert_eq!(state.round, 11);
    assert!(state.pirate_count <= PIRATE_ATTACK_THRESHOLD);
}
