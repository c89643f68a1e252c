//! Integration tests for the TrueSkill engine
//!
//! These tests validate complete rating updates against published
//! reference values, including:
//! - Head-to-head wins, draws and upsets
//! - Free-for-all matches that need the looped schedule
//! - Team matches with uneven team sizes
//! - Outcome probabilities and input validation

mod fixtures;

use factor_skill::{
    ConvergenceSettings, Rating, RatingCalculator, SkillError, TrueSkillCalculator,
    TrueSkillConfig,
};

use fixtures::{
    assert_rating_close, calculator, calculator_with_draws, default_players, default_teams,
};

#[test]
fn test_head_to_head_win() {
    let result = calculator()
        .adjust_skills(&default_players(2), &[false])
        .unwrap();

    assert_rating_close(&result.ratings[0], 29.396, 7.171, 0.01);
    assert_rating_close(&result.ratings[1], 20.604, 7.171, 0.01);
    assert!(result.ratings[0].sigma < 25.0 / 3.0);
    assert!(result.ratings[1].sigma < 25.0 / 3.0);
}

#[test]
fn test_head_to_head_draw() {
    let result = calculator()
        .adjust_skills(&default_players(2), &[true])
        .unwrap();

    for rating in &result.ratings {
        assert_rating_close(rating, 25.0, 6.458, 0.01);
    }
}

#[test]
fn test_upset_moves_ratings_further() {
    let calculator = calculator();
    let underdog = Rating::new(20.0, 4.0);
    let favourite = Rating::new(30.0, 3.0);

    let upset = calculator
        .adjust_skills(&[underdog, favourite], &[false])
        .unwrap();
    assert_rating_close(&upset.ratings[0], 23.822, 3.521, 0.01);
    assert_rating_close(&upset.ratings[1], 27.850, 2.804, 0.01);

    let expected = calculator
        .adjust_skills(&[favourite, underdog], &[false])
        .unwrap();
    let upset_gain = upset.ratings[0].mu - underdog.mu;
    let expected_loss = underdog.mu - expected.ratings[1].mu;
    assert!(upset_gain > expected_loss);
    assert!(upset.probability < expected.probability);
}

#[test]
fn test_expected_result_barely_moves() {
    let strong = Rating::new(35.0, 1.0);
    let weak = Rating::new(15.0, 1.0);

    let result = calculator().adjust_skills(&[strong, weak], &[false]).unwrap();
    assert!((result.ratings[0].mu - 35.0).abs() < 0.01);
    assert!((result.ratings[1].mu - 15.0).abs() < 0.01);
    assert!(result.probability > 0.99);
}

#[test]
fn test_four_player_free_for_all() {
    let result = calculator()
        .adjust_skills(&default_players(4), &[false, false, false])
        .unwrap();

    assert_rating_close(&result.ratings[0], 33.207, 6.348, 0.01);
    assert_rating_close(&result.ratings[1], 27.401, 5.787, 0.01);
    assert_rating_close(&result.ratings[2], 22.599, 5.787, 0.01);
    assert_rating_close(&result.ratings[3], 16.793, 6.348, 0.01);
}

#[test]
fn test_eight_player_free_for_all_is_ordered() {
    let result = calculator()
        .adjust_skills(&default_players(8), &[false; 7])
        .unwrap();

    assert_rating_close(&result.ratings[0], 36.771, 5.749, 0.01);
    assert_rating_close(&result.ratings[7], 13.229, 5.749, 0.01);
    for pair in result.ratings.windows(2) {
        assert!(pair[0].mu > pair[1].mu);
    }
}

#[test]
fn test_three_way_draw_keeps_means() {
    let result = calculator()
        .adjust_skills(&default_players(3), &[true, true])
        .unwrap();

    for rating in &result.ratings {
        assert!((rating.mu - 25.0).abs() < 1e-6);
        assert!(rating.sigma < 6.0);
    }
}

#[test]
fn test_one_against_two() {
    let teams = vec![vec![Rating::default()], vec![Rating::default(); 2]];
    let result = calculator().adjust_team_skills(&teams, &[false]).unwrap();

    assert_eq!(result.teams[0].len(), 1);
    assert_eq!(result.teams[1].len(), 2);
    assert_rating_close(&result.teams[0][0], 33.731, 7.317, 0.01);
    assert_rating_close(&result.teams[1][0], 16.269, 7.317, 0.01);
    assert_rating_close(&result.teams[1][1], 16.269, 7.317, 0.01);
}

#[test]
fn test_two_on_two_draw() {
    let result = calculator()
        .adjust_team_skills(&default_teams(2, 2), &[true])
        .unwrap();

    for rating in result.teams.iter().flatten() {
        assert_rating_close(rating, 25.0, 7.455, 0.01);
    }
}

#[test]
fn test_head_to_head_outcomes_sum_to_one() {
    let calculator = calculator();
    let a = Rating::new(27.0, 4.0);
    let b = Rating::new(24.0, 6.0);

    let a_wins = calculator.adjust_skills(&[a, b], &[false]).unwrap();
    let b_wins = calculator.adjust_skills(&[b, a], &[false]).unwrap();
    let draw = calculator.adjust_skills(&[a, b], &[true]).unwrap();

    let total = a_wins.probability + b_wins.probability + draw.probability;
    assert!((total - 1.0).abs() < 1e-6, "total probability {}", total);
}

#[test]
fn test_no_draw_margin_gives_even_odds() {
    let result = calculator_with_draws(0.0)
        .adjust_skills(&default_players(2), &[false])
        .unwrap();
    assert!((result.probability - 0.5).abs() < 1e-9);
}

#[test]
fn test_results_are_reproducible() {
    let calculator = calculator();
    let players = vec![
        Rating::new(31.0, 3.0),
        Rating::new(22.0, 7.5),
        Rating::new(26.0, 1.5),
        Rating::new(18.0, 8.0),
    ];
    let draws = [false, true, false];

    let first = calculator.adjust_skills(&players, &draws).unwrap();
    let second = calculator.adjust_skills(&players, &draws).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_pass_cap_still_returns_ratings() {
    let calculator = calculator()
        .with_convergence(ConvergenceSettings {
            max_delta: 1e-4,
            max_passes: 1,
        })
        .unwrap();

    let result = calculator
        .adjust_skills(&default_players(3), &[false, false])
        .unwrap();
    assert_rating_close(&result.ratings[0], 31.550, 6.991, 0.01);
    assert!(result.ratings[0].mu > result.ratings[1].mu);
    assert!(result.ratings[1].mu > result.ratings[2].mu);
}

#[test]
fn test_malformed_input_fails() {
    let calculator = calculator();

    let err = calculator
        .adjust_skills(&default_players(4), &[false, false])
        .unwrap_err();
    assert!(matches!(err, SkillError::MalformedMatch { .. }));

    assert!(calculator.adjust_skills(&[], &[]).is_err());
    assert!(calculator
        .adjust_team_skills(&[vec![], vec![Rating::default()]], &[false])
        .is_err());
}

#[test]
fn test_custom_configuration() {
    let config = TrueSkillConfig::new(1200.0, 400.0, 200.0, 4.0, 5.0).unwrap();
    let calculator = TrueSkillCalculator::new(config);

    let newcomer = calculator.new_default_player();
    assert_eq!(newcomer, Rating::new(1200.0, 400.0));

    let result = calculator
        .adjust_skills(&[newcomer, newcomer], &[false])
        .unwrap();
    assert!(result.ratings[0].mu > 1200.0);
    assert!(result.ratings[1].mu < 1200.0);
    assert!(calculator.true_skill(&result.ratings[0]) <= 2400.0);
}

#[test]
fn test_leaderboard_after_match() {
    let calculator = calculator();
    let result = calculator
        .adjust_skills(&default_players(3), &[false, false])
        .unwrap();

    assert_eq!(calculator.leaderboard(&result.ratings), vec![0, 1, 2]);
}

#[test]
fn test_foregone_result_has_finite_probability() {
    let players = [
        Rating::new(25.0, 8.0),
        Rating::new(25.0, 8.0),
        Rating::new(-75.0, 1.0),
    ];
    let result = calculator().adjust_skills(&players, &[false, false]).unwrap();

    assert!(result.probability.is_finite());
    assert!((0.0..=1.0).contains(&result.probability));
    assert!(result.ratings.iter().all(|r| r.mu.is_finite() && r.sigma.is_finite()));
}

#[test]
fn test_impossible_draw_has_zero_probability() {
    let players = [
        Rating::new(0.0, 0.1),
        Rating::new(1000.0, 0.1),
        Rating::new(10.0, 0.1),
    ];
    let result = calculator().adjust_skills(&players, &[true, false]).unwrap();
    assert_eq!(result.probability, 0.0);
}

#[test]
fn test_three_player_outcomes_sum_to_one() {
    let calculator = calculator();
    let players = [
        Rating::new(30.0, 3.0),
        Rating::new(25.0, 5.0),
        Rating::new(20.0, 4.0),
    ];

    // Six strict orders, three ties for first, three ties for last, one
    // three-way tie
    let outcomes: [([usize; 3], [bool; 2]); 13] = [
        ([0, 1, 2], [false, false]),
        ([0, 2, 1], [false, false]),
        ([1, 0, 2], [false, false]),
        ([1, 2, 0], [false, false]),
        ([2, 0, 1], [false, false]),
        ([2, 1, 0], [false, false]),
        ([0, 1, 2], [true, false]),
        ([0, 2, 1], [true, false]),
        ([1, 2, 0], [true, false]),
        ([2, 0, 1], [false, true]),
        ([1, 0, 2], [false, true]),
        ([0, 1, 2], [false, true]),
        ([0, 1, 2], [true, true]),
    ];

    let total: f64 = outcomes
        .iter()
        .map(|(order, draws)| {
            let ranked: Vec<Rating> = order.iter().map(|&i| players[i]).collect();
            let result = calculator.adjust_skills(&ranked, draws).unwrap();
            assert!(result.probability.is_finite());
            result.probability
        })
        .sum();

    // Evidence is approximate once comparisons share a team
    assert!((total - 1.0).abs() < 5e-3, "total probability {}", total);
}

#[test]
fn test_degenerate_rating_rejected() {
    let config = TrueSkillConfig::new(25.0, 8.0, 4.0, 0.0, 10.0).unwrap();
    let calculator = TrueSkillCalculator::new(config);

    let err = calculator
        .adjust_skills(&[Rating::new(25.0, 0.0), Rating::new(25.0, 1.0)], &[false])
        .unwrap_err();
    assert!(matches!(err, SkillError::InvalidParameter { .. }));

    assert!(calculator
        .match_quality(&[Rating::new(f64::INFINITY, 1.0), Rating::default()])
        .is_err());
}
