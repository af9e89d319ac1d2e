use uuid::Uuid;

use rei_da_pelada_backend::config::settings::RankingSettings;
use rei_da_pelada_backend::models::game::{MatchEvent, MatchStatus};
use rei_da_pelada_backend::models::player::Position;
use rei_da_pelada_backend::ranking::highlights::{match_highlights, pelada_highlights};
use rei_da_pelada_backend::ranking::{Aggregator, RankingContext, RankingError};

mod common;
use common::fixtures::{date, two_player_league, League, Line};

struct Round {
    league: League,
    pelada: Uuid,
    game: Uuid,
    keeper: Uuid,
    defenders: [Uuid; 3],
    midfielder: Uuid,
    forwards: [Uuid; 2],
}

fn round() -> Round {
    let mut league = League::new();
    let keeper = league.player("Goleiro", Position::Goalkeeper);
    let defenders = [
        league.player("Zagueiro 1", Position::Defender),
        league.player("Zagueiro 2", Position::Defender),
        league.player("Zagueiro 3", Position::Defender),
    ];
    let midfielder = league.player("Meia", Position::Midfielder);
    let forwards = [
        league.player("Atacante 1", Position::Forward),
        league.player("Atacante 2", Position::Forward),
    ];
    let mut members = vec![keeper, midfielder];
    members.extend(defenders);
    members.extend(forwards);
    let pelada = league.pelada("Pelada", &members);
    let game = league.finalized(pelada, date(2024, 5, 10));

    league.record(game, keeper, Line { saves: 6, goals_conceded: 3, ..Default::default() }); // 12
    league.record(game, defenders[0], Line { tackles: 5, ..Default::default() }); // 5
    league.record(game, defenders[1], Line { tackles: 2, worst: 2, ..Default::default() }); // -4
    league.record(game, defenders[2], Line { tackles: 5, assists: 1, ..Default::default() }); // 10
    league.record(game, midfielder, Line { assists: 3, ..Default::default() }); // 15
    league.record(game, forwards[0], Line { goals: 2, mvp: 3, ..Default::default() }); // 25
    league.record(game, forwards[1], Line { goals: 2, ..Default::default() }); // 16

    Round { league, pelada, game, keeper, defenders, midfielder, forwards }
}

#[test]
fn test_match_highlights() {
    let round = round();
    let highlights = match_highlights(&round.league.snapshot, round.game).unwrap();

    // Both forwards scored twice; the lower id wins
    let artilheiro = highlights.artilheiro.expect("Somebody scored");
    assert_eq!(artilheiro.jogador.usuario_id, round.forwards[0]);
    assert_eq!(artilheiro.valor, 2);

    assert_eq!(highlights.garcom.unwrap().jogador.usuario_id, round.midfielder);

    let xerife = highlights.xerife.unwrap();
    assert_eq!(xerife.jogador.usuario_id, round.defenders[0]);
    assert_eq!(xerife.valor, 5);

    let paredao = highlights.paredao.unwrap();
    assert_eq!(paredao.jogador.usuario_id, round.keeper);
    assert_eq!(paredao.valor, 12);

    let mvp = highlights.mvp.unwrap();
    assert_eq!(mvp.jogador.usuario_id, round.forwards[0]);
    assert_eq!(mvp.valor, 25);

    let bola_murcha = highlights.bola_murcha.unwrap();
    assert_eq!(bola_murcha.jogador.usuario_id, round.defenders[1]);
    assert_eq!(bola_murcha.valor, -4);

    let podium: Vec<(u32, Uuid, i64)> = highlights
        .top_3
        .iter()
        .map(|p| (p.posicao, p.jogador.usuario_id, p.pontos))
        .collect();
    assert_eq!(
        podium,
        vec![
            (1, round.forwards[0], 25),
            (2, round.forwards[1], 16),
            (3, round.midfielder, 15),
        ]
    );
}

#[test]
fn test_team_of_the_round() {
    let round = round();
    let team = match_highlights(&round.league.snapshot, round.game)
        .unwrap()
        .time_da_rodada;

    assert_eq!(team.goleiro.map(|p| p.usuario_id), Some(round.keeper));
    let zagueiros: Vec<Uuid> = team.zagueiros.iter().map(|p| p.usuario_id).collect();
    assert_eq!(zagueiros, vec![round.defenders[2], round.defenders[0]]);
    assert_eq!(team.meio_campos.len(), 1);
    assert_eq!(team.atacantes.len(), 1);
    assert_eq!(team.atacantes[0].usuario_id, round.forwards[0]);
}

#[test]
fn test_goalless_match_has_no_top_scorer() {
    let mut league = League::new();
    let player = league.player("Pedro", Position::Midfielder);
    let pelada = league.pelada("Pelada", &[player]);
    let game = league.finalized(pelada, date(2024, 5, 10));
    league.record(game, player, Line { tackles: 1, ..Default::default() });

    let highlights = match_highlights(&league.snapshot, game).unwrap();
    assert!(highlights.artilheiro.is_none());
    assert!(highlights.garcom.is_none());
    assert!(highlights.paredao.is_none());
    assert!(highlights.xerife.is_some());
    assert_eq!(highlights.top_3.len(), 1);
}

#[test]
fn test_match_highlights_require_a_finalized_match() {
    let mut league = League::new();
    let player = league.player("Quico", Position::Forward);
    let pelada = league.pelada("Pelada", &[player]);
    let voting = league.game(pelada, date(2024, 5, 10), MatchStatus::Voting);
    league.record(voting, player, Line::goals(1));

    assert!(matches!(
        match_highlights(&league.snapshot, voting),
        Err(RankingError::MatchNotFinalized(id)) if id == voting
    ));
    assert!(matches!(
        match_highlights(&league.snapshot, Uuid::new_v4()),
        Err(RankingError::MatchNotFound(_))
    ));
}

#[test]
fn test_pelada_highlights() {
    let round = round();
    let context = RankingContext::new(date(2024, 6, 1), RankingSettings::default());
    let aggregator = Aggregator::new(&round.league.snapshot, context);

    let highlights = pelada_highlights(&aggregator, &round.league.snapshot, round.pelada).unwrap();

    assert_eq!(highlights.pelada_id, round.pelada);
    let rei = highlights.rei.unwrap();
    assert_eq!(rei.jogador.usuario_id, round.forwards[0]);
    assert_eq!(rei.valor, 25);
    assert_eq!(highlights.artilheiro.unwrap().jogador.usuario_id, round.forwards[0]);
    assert_eq!(highlights.garcom.unwrap().valor, 3);
    assert_eq!(highlights.xerife.unwrap().jogador.usuario_id, round.defenders[0]);
    assert_eq!(highlights.paredao.unwrap().valor, 6);
}

#[test]
fn test_pelada_highlights_without_saves() {
    let fixture = two_player_league();
    let mut snapshot = fixture.league.snapshot.clone();
    // Drop the keeper's line so nobody saved anything
    snapshot.insert_event(MatchEvent::new(fixture.match_id, fixture.keeper_b));
    let context = RankingContext::new(date(2024, 6, 1), RankingSettings::default());
    let aggregator = Aggregator::new(&snapshot, context);

    let highlights = pelada_highlights(&aggregator, &snapshot, fixture.pelada_id).unwrap();
    assert!(highlights.paredao.is_none());
    assert!(highlights.xerife.is_none());
    assert_eq!(highlights.rei.unwrap().jogador.usuario_id, fixture.player_a);
}
