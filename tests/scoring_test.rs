use uuid::Uuid;

use rei_da_pelada_backend::config::settings::RankingSettings;
use rei_da_pelada_backend::models::game::MatchEvent;
use rei_da_pelada_backend::models::player::Position;
use rei_da_pelada_backend::ranking::scoring::{score_breakdown, score_event};
use rei_da_pelada_backend::ranking::{rank_players, Aggregator, RankingContext, RankingScope};

mod common;
use common::fixtures::{date, two_player_league};

fn event(goals: u32, assists: u32, tackles: u32, saves: u32, mvp: u32, worst: u32) -> MatchEvent {
    MatchEvent {
        goals,
        assists,
        tackles,
        saves,
        mvp_votes: mvp,
        worst_votes: worst,
        ..MatchEvent::new(Uuid::new_v4(), Uuid::new_v4())
    }
}

#[test]
fn test_forward_walkthrough_scores_24() {
    let line = event(2, 1, 0, 0, 1, 0);
    assert_eq!(score_event(Position::Forward, &line), 24);
}

#[test]
fn test_goalkeeper_walkthrough_scores_3() {
    let line = event(0, 0, 0, 3, 0, 1);
    assert_eq!(score_event(Position::Goalkeeper, &line), 3);
}

#[test]
fn test_saves_only_count_for_goalkeepers() {
    let line = event(0, 0, 0, 5, 0, 0);
    assert_eq!(score_event(Position::Goalkeeper, &line), 10);
    for position in [Position::Defender, Position::Midfielder, Position::Forward] {
        assert_eq!(score_event(position, &line), 0, "{:?} should not score saves", position);
    }
}

#[test]
fn test_goals_conceded_never_score() {
    let mut line = event(1, 0, 0, 0, 0, 0);
    let before = score_event(Position::Goalkeeper, &line);
    line.goals_conceded = 7;
    assert_eq!(score_event(Position::Goalkeeper, &line), before);
}

#[test]
fn test_worst_votes_can_make_a_match_negative() {
    let line = event(0, 0, 1, 0, 0, 4);
    assert_eq!(score_event(Position::Defender, &line), 1 - 12);
}

#[test]
fn test_breakdown_splits_stats_and_votes() {
    let line = event(1, 1, 2, 0, 2, 1);
    let breakdown = score_breakdown(Position::Midfielder, &line);
    assert_eq!(breakdown.stat_points, 8 + 5 + 2);
    assert_eq!(breakdown.vote_points, 6 - 3);
    assert_eq!(breakdown.total(), score_event(Position::Midfielder, &line));
}

#[test]
fn test_walkthrough_ranks_forward_above_goalkeeper() {
    let fixture = two_player_league();
    let context = RankingContext::new(date(2024, 1, 1), RankingSettings::default());
    let aggregator = Aggregator::new(&fixture.league.snapshot, context);

    let ranked = rank_players(
        aggregator
            .aggregate(&RankingScope::PeladaAllTime(fixture.pelada_id))
            .expect("Aggregation failed"),
    );

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].aggregate.player_id, fixture.player_a);
    assert_eq!(ranked[0].position, 1);
    assert_eq!(ranked[0].aggregate.total_points, 24);
    assert_eq!(ranked[1].aggregate.player_id, fixture.keeper_b);
    assert_eq!(ranked[1].position, 2);
    assert_eq!(ranked[1].aggregate.total_points, 3);
}
