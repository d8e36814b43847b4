//! # Play Context Resolver
//!
//! Decides whether a play is analyzable and fixes its actors.
//!
//! ## Algorithm
//! 1. Ball landing and pre-throw frames must exist
//! 2. `window_start = throw_frame - W`; window = pre-throw rows at or after it
//! 3. Snapshot = rows at `window_start` (else the window's earliest frame)
//! 4. Passer must be in the snapshot; `ball_land_x - passer_x >= MIN_AIR_YARDS`
//! 5. Victim = Defensive Coverage row nearest to the ball landing point
//! 6. Targeted Receiver recorded if present
//!
//! The Victim is chosen once and held for the rest of the analysis.

use crate::config::AnalysisConfig;
use crate::geometry::{distance, FieldPos};
use crate::models::{Exclusion, Play, PlayerRole, TrackingFrame};

/// Identity of one resolved actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorRef {
    pub nfl_id: i64,
    pub name: Option<String>,
    pub position: Option<String>,
}

impl ActorRef {
    fn from_frame(frame: &TrackingFrame) -> Self {
        Self {
            nfl_id: frame.nfl_id,
            name: frame.player_name.clone(),
            position: frame.player_position.clone(),
        }
    }
}

/// Fixed actor set and window bounds of an analyzable play.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub ball_land: FieldPos,
    pub throw_frame: i32,
    /// First frame of the void window (`throw_frame - W`)
    pub window_start: i32,
    /// Frame the actors were resolved at
    pub snapshot_frame: i32,
    pub passer: ActorRef,
    pub passer_pos: FieldPos,
    pub victim: ActorRef,
    pub victim_pos: FieldPos,
    pub target: Option<ActorRef>,
    pub air_yards: f64,
}

impl ResolvedContext {
    /// Victim rows inside the void window, in frame order.
    pub fn victim_window<'a>(&self, play: &'a Play) -> impl Iterator<Item = &'a TrackingFrame> {
        let start = self.window_start;
        play.track(self.victim.nfl_id)
            .iter()
            .filter(move |f| f.is_pre_throw() && f.frame_id >= start)
    }

    /// Snapshot rows the actors were resolved from.
    pub fn snapshot<'a>(&self, play: &'a Play) -> impl Iterator<Item = &'a TrackingFrame> {
        let frame_id = self.snapshot_frame;
        play.frames
            .iter()
            .filter(move |f| f.is_pre_throw() && f.frame_id == frame_id)
    }
}

/// Resolve the actor set or return why the play is not analyzable.
pub fn resolve_context(play: &Play, config: &AnalysisConfig) -> Result<ResolvedContext, Exclusion> {
    let ball_land = play.ball_land.ok_or(Exclusion::MissingBallLanding)?;
    let throw_frame = play.throw_frame().ok_or(Exclusion::NoPreThrowFrames)?;

    let window_start = throw_frame - config.window.void_window_frames;
    let snapshot_frame = play
        .frames
        .iter()
        .filter(|f| f.is_pre_throw() && f.frame_id >= window_start)
        .map(|f| f.frame_id)
        .min()
        .ok_or(Exclusion::EmptyWindow)?;

    let snapshot: Vec<&TrackingFrame> = play
        .frames
        .iter()
        .filter(|f| f.is_pre_throw() && f.frame_id == snapshot_frame)
        .collect();

    let passer = snapshot
        .iter()
        .find(|f| f.has_role(&PlayerRole::Passer))
        .ok_or(Exclusion::NoPasser)?;

    let air_yards = ball_land.0 - passer.x;
    if air_yards < config.context.min_air_yards {
        return Err(Exclusion::ShortAirYards);
    }

    let victim = snapshot
        .iter()
        .filter(|f| f.has_role(&PlayerRole::DefensiveCoverage))
        .fold(None::<(&TrackingFrame, f64)>, |best, f| {
            let d = distance(f.pos(), ball_land);
            match best {
                Some((bf, bd)) if bd < d || (bd == d && bf.nfl_id <= f.nfl_id) => best,
                _ => Some((*f, d)),
            }
        })
        .map(|(f, _)| f)
        .ok_or(Exclusion::NoCoverageDefender)?;

    let target = snapshot
        .iter()
        .find(|f| f.has_role(&PlayerRole::TargetedReceiver))
        .map(|f| ActorRef::from_frame(f));

    Ok(ResolvedContext {
        ball_land,
        throw_frame,
        window_start,
        snapshot_frame,
        passer: ActorRef::from_frame(passer),
        passer_pos: passer.pos(),
        victim: ActorRef::from_frame(victim),
        victim_pos: victim.pos(),
        target,
        air_yards,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Phase, Play, PlayDirection, PlayInfo, PlayKey, PlayerRole, TrackingFrame};

    pub fn row(nfl_id: i64, frame_id: i32, role: PlayerRole, x: f64, y: f64) -> TrackingFrame {
        TrackingFrame {
            game_id: 1,
            play_id: 1,
            nfl_id,
            frame_id,
            phase: Phase::PreThrow,
            x,
            y,
            speed: Some(0.0),
            acceleration: Some(0.0),
            direction: Some(0.0),
            orientation: Some(0.0),
            player_name: Some(format!("Player {}", nfl_id)),
            player_position: None,
            player_role: Some(role),
            player_side: None,
        }
    }

    /// Every row of `rows` repeated for frames 1..=frames at a fixed spot.
    pub fn static_play(rows: &[TrackingFrame], frames: i32, ball: (f64, f64)) -> Play {
        let mut out = Vec::new();
        for r in rows {
            for f in 1..=frames {
                let mut c = r.clone();
                c.frame_id = f;
                out.push(c);
            }
        }
        out.sort_by_key(|f| (f.nfl_id, f.frame_id));
        Play {
            key: PlayKey::new(1, 1),
            direction: Some(PlayDirection::Right),
            ball_land: Some(ball),
            info: PlayInfo::default(),
            frames: out,
        }
    }
}
