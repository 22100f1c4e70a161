//! Client-side mirror of the match.
//!
//! The [`Arena`] owns every piece of view state: players, pooled snowballs,
//! trees, scores and ammo. Server messages are applied with
//! [`Arena::apply`], which overwrites positions and velocities outright and
//! reports what the renderer needs to spawn, despawn or play. Between
//! messages [`Arena::step`] coasts everything along its last velocity and
//! resolves the purely cosmetic local collisions.

use glam::Vec2;

use crate::animation::{
    AnimationEvent, Animator, DirectionKeys, SPLASH, walk_cycle_for_heading,
};
use crate::motion::{Motion, is_out_of_bounds};
use crate::net::messages::{
    GameStartedMsg, PlayerId, PlayerInfo, PlayerMoveMsg, PlayerMovedMsg, PlayerStoppedMsg,
    ServerMessage, Skin, SnowballChangedMsg, ThrowBallMsg,
};
use crate::obstacles::{
    HIDDEN_TREE_ALPHA, TreeLayout, depth_slot, player_depth, sort_trees, tree_depth,
};
use crate::registry::{Claim, Join, Roster, SNOWBALL_POOL_SIZE, SlotIndex, SnowballPool};
use crate::scoreboard::Scoreboard;

/// Side of a character frame in world pixels.
pub const PLAYER_SIZE: f32 = 48.0;
/// Radius of the circular body centered in the character frame.
pub const BODY_RADIUS: f32 = 12.0;
/// Radius of a flying snowball.
pub const SNOWBALL_RADIUS: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct PlayerView {
    pub name: String,
    pub skin: Skin,
    pub motion: Motion,
    pub animator: Animator,
}

impl PlayerView {
    fn new(name: impl Into<String>, skin: Skin, center: Vec2) -> Self {
        Self {
            name: name.into(),
            skin,
            motion: Motion::at(center),
            animator: Animator::new(),
        }
    }

    /// Bottom edge of the character frame.
    pub fn bottom(&self) -> f32 {
        self.motion.center.y + PLAYER_SIZE / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnowballState {
    #[default]
    Flying,
    /// Playing the splash; the slot is killed when it ends.
    Splashing,
}

#[derive(Debug, Clone, Default)]
pub struct SnowballView {
    pub motion: Motion,
    pub state: SnowballState,
    pub animator: Animator,
}

#[derive(Debug, Clone)]
pub struct TreeView {
    pub layout: TreeLayout,
    pub alpha: f32,
}

/// Snowballs the local player can still throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ammo {
    pub max: u32,
    pub count: u32,
}

/// Something the renderer has to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    /// A (new) match began; everything from the previous one is gone.
    Started { bounds: Vec2 },
    PlayerJoined { id: PlayerId },
    PlayerLeft { id: PlayerId },
    TreesPlanted { count: usize },
    AmmoReady { max: u32 },
    AmmoChanged { count: u32 },
    StepsStarted,
    StepsStopped,
    Scored { id: PlayerId, delta: i64, at: Vec2 },
    ScoresChanged,
}

#[derive(Debug, Clone)]
pub struct Arena {
    bounds: Vec2,
    started: bool,
    players: Roster<PlayerView>,
    snowballs: SnowballPool<SnowballView>,
    trees: Vec<TreeView>,
    scoreboard: Scoreboard,
    ammo: Option<Ammo>,
    stepping: bool,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self::with_pool_size(SNOWBALL_POOL_SIZE)
    }

    pub fn with_pool_size(capacity: usize) -> Self {
        Self {
            bounds: Vec2::ZERO,
            started: false,
            players: Roster::new(),
            snowballs: SnowballPool::new(capacity),
            trees: Vec::new(),
            scoreboard: Scoreboard::new(),
            ammo: None,
            stepping: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn local_id(&self) -> Option<&PlayerId> {
        self.players.local_id()
    }

    pub fn is_local(&self, id: &str) -> bool {
        self.players.is_local(id)
    }

    pub fn player(&self, id: &str) -> Option<&PlayerView> {
        self.players.resolve(id)
    }

    pub fn local_player(&self) -> Option<&PlayerView> {
        self.players.local()
    }

    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &PlayerView)> {
        self.players.iter()
    }

    pub fn snowball_capacity(&self) -> usize {
        self.snowballs.capacity()
    }

    /// The snowball in `slot`, if the slot is in use.
    pub fn snowball(&self, slot: SlotIndex) -> Option<&SnowballView> {
        if self.snowballs.is_alive(slot) {
            self.snowballs.get(slot)
        } else {
            None
        }
    }

    pub fn trees(&self) -> &[TreeView] {
        &self.trees
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn ammo(&self) -> Option<Ammo> {
        self.ammo
    }

    /// Draw depth of a player relative to the trees.
    pub fn player_depth(&self, id: &str) -> Option<f32> {
        let view = self.players.resolve(id)?;
        let slot = depth_slot(view.bottom(), self.trees.iter().map(|t| t.layout.bottom()));
        Some(player_depth(slot))
    }

    pub fn tree_depth(&self, index: usize) -> f32 {
        tree_depth(index)
    }

    /// Apply one server message.
    pub fn apply(&mut self, msg: ServerMessage) -> Vec<ArenaEvent> {
        let mut events = Vec::new();
        match msg {
            ServerMessage::GameStarted(started) => self.start(*started, &mut events),
            ServerMessage::PlayerMoved(moved) => self.player_moved(moved, &mut events),
            ServerMessage::PlayerStopped(stopped) => self.player_stopped(stopped, &mut events),
            ServerMessage::EnemyConnected(info) => self.enemy_connected(info, &mut events),
            ServerMessage::EnemyDisconnected(gone) => {
                if self.players.remove_remote(&gone.id).is_none() {
                    return events;
                }
                self.scoreboard.remove(&gone.id);
                events.push(ArenaEvent::PlayerLeft { id: gone.id });
                events.push(ArenaEvent::ScoresChanged);
            },
            ServerMessage::SnowballChanged(ball) => self.snowball_changed(ball),
            ServerMessage::ScoreChanged(score) => {
                if self.scoreboard.set_score(&score.player_id, score.new_score) {
                    events.push(ArenaEvent::ScoresChanged);
                }
            },
            ServerMessage::PlayerScored(scored) => {
                if let Some(view) = self.players.resolve(&scored.player_id) {
                    events.push(ArenaEvent::Scored {
                        at: view.motion.center,
                        id: scored.player_id,
                        delta: scored.score_delta,
                    });
                }
            },
            ServerMessage::SnowballCountChanged(count) => {
                if let Some(ammo) = &mut self.ammo {
                    ammo.count = count.new_count;
                    events.push(ArenaEvent::AmmoChanged {
                        count: count.new_count,
                    });
                }
            },
        }
        events
    }

    fn start(&mut self, msg: GameStartedMsg, events: &mut Vec<ArenaEvent>) {
        let GameStartedMsg {
            id,
            width,
            height,
            player_name,
            skin,
            mut trees,
            players_info,
            max_snowballs,
        } = msg;

        self.players.clear();
        self.snowballs.clear();
        self.scoreboard.clear();
        self.stepping = false;
        self.started = true;
        self.bounds = Vec2::new(width, height);
        events.push(ArenaEvent::Started {
            bounds: self.bounds,
        });

        self.scoreboard.insert(id.clone(), player_name.as_str());
        self.players.set_local(
            id.clone(),
            PlayerView::new(player_name, skin, self.bounds / 2.0),
        );
        events.push(ArenaEvent::PlayerJoined { id });

        sort_trees(&mut trees);
        self.trees = trees
            .iter()
            .map(|info| TreeView {
                layout: TreeLayout::place(info),
                alpha: 1.0,
            })
            .collect();
        events.push(ArenaEvent::TreesPlanted {
            count: self.trees.len(),
        });

        for info in players_info {
            self.enemy_connected(info, events);
        }

        self.ammo = max_snowballs.map(|max| Ammo { max, count: max });
        if let Some(max) = max_snowballs {
            events.push(ArenaEvent::AmmoReady { max });
        }
        events.push(ArenaEvent::ScoresChanged);
        tracing::debug!(
            width,
            height,
            trees = self.trees.len(),
            players = self.players.len(),
            "Match started"
        );
    }

    fn player_moved(&mut self, msg: PlayerMovedMsg, events: &mut Vec<ArenaEvent>) {
        let is_local = self.players.is_local(&msg.id);
        let Some(view) = self.players.resolve_mut(&msg.id) else {
            return;
        };
        view.motion
            .start(Vec2::new(msg.x, msg.y), msg.velocity, msg.angle);
        if is_local {
            if !self.stepping {
                self.stepping = true;
                events.push(ArenaEvent::StepsStarted);
            }
        } else {
            view.animator
                .walk(walk_cycle_for_heading(msg.velocity, msg.angle));
        }
    }

    fn player_stopped(&mut self, msg: PlayerStoppedMsg, events: &mut Vec<ArenaEvent>) {
        let is_local = self.players.is_local(&msg.id);
        let Some(view) = self.players.resolve_mut(&msg.id) else {
            return;
        };
        view.motion.stop(Vec2::new(msg.x, msg.y));
        if is_local {
            if self.stepping {
                self.stepping = false;
                events.push(ArenaEvent::StepsStopped);
            }
        } else {
            view.animator.stop();
        }
    }

    fn enemy_connected(&mut self, info: PlayerInfo, events: &mut Vec<ArenaEvent>) {
        let PlayerInfo {
            id,
            x,
            y,
            name,
            skin,
        } = info;
        let view = PlayerView::new(name.as_str(), skin, Vec2::new(x, y));
        match self.players.insert_remote(id.clone(), view) {
            Join::RejectedLocal => {
                tracing::debug!(id = %id, "Ignoring enemy announcement for local player");
                return;
            },
            Join::Replaced(_) => events.push(ArenaEvent::PlayerLeft { id: id.clone() }),
            Join::Added => {},
        }
        self.scoreboard.insert(id.clone(), name);
        events.push(ArenaEvent::PlayerJoined { id });
        events.push(ArenaEvent::ScoresChanged);
    }

    fn snowball_changed(&mut self, msg: SnowballChangedMsg) {
        let slot = match self.snowballs.claim(msg.id) {
            Claim::Live(slot) | Claim::Revived(slot) => slot,
            Claim::Suppressed => {
                if msg.deleted {
                    self.snowballs.release(msg.id);
                }
                return;
            },
            Claim::Exhausted => {
                tracing::warn!(id = msg.id, "Snowball pool exhausted, dropping update");
                return;
            },
        };
        if msg.deleted {
            self.snowballs.release(msg.id);
        }
        let Some(view) = self.snowballs.get_mut(slot) else {
            return;
        };

        let center = Vec2::new(msg.x, msg.y);
        if msg.deleted {
            view.motion.stop(center);
            view.state = SnowballState::Splashing;
            view.animator.play(SPLASH);
        } else {
            if view.state == SnowballState::Splashing {
                view.state = SnowballState::Flying;
                view.animator = Animator::new();
            }
            view.motion.start(center, msg.velocity, msg.angle);
        }
    }

    /// Update the local walk animation from the held keys and build the
    /// movement intent for the server.
    pub fn steer(&mut self, keys: DirectionKeys) -> PlayerMoveMsg {
        if let Some(view) = self.players.local_mut() {
            view.animator.walk(keys.walk_cycle());
        }
        let (x, y) = keys.direction();
        PlayerMoveMsg { x, y }
    }

    /// Throw request for a click at `target` (world coordinates, y down).
    pub fn throw_at(&self, target: Vec2) -> Option<ThrowBallMsg> {
        self.started.then_some(ThrowBallMsg {
            x: target.x,
            y: target.y,
        })
    }

    /// Advance local simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !self.started {
            return;
        }
        let bounds = self.bounds;

        for (_, view) in self.players.iter_mut() {
            view.motion.integrate(dt);
            for tree in &self.trees {
                if let Some(push) = tree
                    .layout
                    .trunk
                    .separate_circle(view.motion.center, BODY_RADIUS)
                {
                    view.motion.center += push;
                }
            }
            view.motion.clamp_to_bounds(BODY_RADIUS, bounds);
            view.animator.tick(dt);
        }

        let mut dead = Vec::new();
        for (slot, ball) in self.snowballs.iter_alive_mut() {
            match ball.state {
                SnowballState::Flying => {
                    ball.motion.integrate(dt);
                    let center = ball.motion.center;
                    let hit_trunk = self
                        .trees
                        .iter()
                        .any(|t| t.layout.trunk.overlaps_circle(center, SNOWBALL_RADIUS));
                    if hit_trunk || is_out_of_bounds(center, bounds) {
                        dead.push(slot);
                    }
                },
                SnowballState::Splashing => {
                    if ball.animator.tick(dt) == Some(AnimationEvent::Finished) {
                        dead.push(slot);
                    }
                },
            }
        }
        for slot in dead {
            self.snowballs.kill(slot);
        }

        for tree in &mut self.trees {
            let hidden = self
                .players
                .iter()
                .any(|(_, p)| tree.layout.head.overlaps_circle(p.motion.center, BODY_RADIUS));
            tree.alpha = if hidden { HIDDEN_TREE_ALPHA } else { 1.0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::WalkCycle;
    use crate::net::messages::{
        EnemyDisconnectedMsg, PlayerScoredMsg, ScoreChangedMsg, SnowballCountChangedMsg,
        TreeInfo, TreeKind,
    };
    use crate::test_helpers::{
        player_info, player_moved, run_frames, snowball_update, started_arena, tree,
    };

    fn started(trees: Vec<TreeInfo>) -> Arena {
        started_arena(vec![player_info("you", 100.0, 100.0)], trees)
    }

    #[test]
    fn game_started_builds_world() {
        let mut arena = Arena::new();
        let events = arena.apply(ServerMessage::GameStarted(Box::new(GameStartedMsg {
            id: "me".into(),
            width: 800.0,
            height: 600.0,
            player_name: "buggy".into(),
            skin: Skin::Boy,
            trees: vec![],
            players_info: vec![],
            max_snowballs: Some(3),
        })));
        assert_eq!(
            events,
            vec![
                ArenaEvent::Started {
                    bounds: Vec2::new(800.0, 600.0)
                },
                ArenaEvent::PlayerJoined { id: "me".into() },
                ArenaEvent::TreesPlanted { count: 0 },
                ArenaEvent::AmmoReady { max: 3 },
                ArenaEvent::ScoresChanged,
            ]
        );
        let me = arena.local_player().unwrap();
        assert_eq!(me.motion.center, Vec2::new(400.0, 300.0));
        assert_eq!(arena.ammo(), Some(Ammo { max: 3, count: 3 }));
    }

    #[test]
    fn players_info_become_enemies() {
        let arena = started(vec![]);
        assert!(arena.player("you").is_some());
        assert!(!arena.is_local("you"));
        assert_eq!(arena.scoreboard().len(), 2);
    }

    #[test]
    fn reannouncing_enemy_replaces_it() {
        let mut arena = started(vec![]);
        let events = arena.apply(ServerMessage::EnemyConnected(PlayerInfo {
            id: "you".into(),
            x: 5.0,
            y: 5.0,
            name: "alice".into(),
            skin: Skin::Girl,
        }));
        assert_eq!(events[0], ArenaEvent::PlayerLeft { id: "you".into() });
        assert_eq!(events[1], ArenaEvent::PlayerJoined { id: "you".into() });
        assert_eq!(arena.players().count(), 2);
        assert_eq!(arena.player("you").unwrap().skin, Skin::Girl);
    }

    #[test]
    fn enemy_with_local_id_is_ignored() {
        let mut arena = started(vec![]);
        let events = arena.apply(ServerMessage::EnemyConnected(PlayerInfo {
            id: "me".into(),
            x: 5.0,
            y: 5.0,
            name: "impostor".into(),
            skin: Skin::Boy,
        }));
        assert!(events.is_empty());
        assert_eq!(arena.local_player().unwrap().name, "buggy");
    }

    #[test]
    fn disconnect_removes_player_and_score() {
        let mut arena = started(vec![]);
        let events = arena.apply(ServerMessage::EnemyDisconnected(EnemyDisconnectedMsg {
            id: "you".into(),
        }));
        assert_eq!(events[0], ArenaEvent::PlayerLeft { id: "you".into() });
        assert!(arena.player("you").is_none());
        assert!(arena.scoreboard().get("you").is_none());

        let again = arena.apply(ServerMessage::EnemyDisconnected(EnemyDisconnectedMsg {
            id: "you".into(),
        }));
        assert!(again.is_empty());
    }

    #[test]
    fn unknown_player_updates_are_ignored() {
        let mut arena = started(vec![]);
        assert!(arena.apply(player_moved("ghost", 1.0, 1.0, 1.0, 0.0)).is_empty());
        assert!(
            arena
                .apply(ServerMessage::PlayerScored(PlayerScoredMsg {
                    player_id: "ghost".into(),
                    score_delta: 1,
                }))
                .is_empty()
        );
    }

    #[test]
    fn local_movement_toggles_steps_once() {
        let mut arena = started(vec![]);
        assert_eq!(
            arena.apply(player_moved("me", 400.0, 300.0, 10.0, 0.0)),
            vec![ArenaEvent::StepsStarted]
        );
        assert!(arena.apply(player_moved("me", 401.0, 300.0, 10.0, 0.0)).is_empty());
        let stop = ServerMessage::PlayerStopped(PlayerStoppedMsg {
            id: "me".into(),
            x: 410.0,
            y: 300.0,
        });
        assert_eq!(arena.apply(stop), vec![ArenaEvent::StepsStopped]);
        assert_eq!(
            arena.local_player().unwrap().motion.center,
            Vec2::new(410.0, 300.0)
        );
    }

    #[test]
    fn remote_movement_picks_animation_from_heading() {
        let mut arena = started(vec![]);
        arena.apply(player_moved("you", 100.0, 100.0, 10.0, std::f32::consts::PI));
        let clip = arena.player("you").unwrap().animator.clip().unwrap();
        assert_eq!(clip.name, WalkCycle::Left.clip().name);

        arena.apply(ServerMessage::PlayerStopped(PlayerStoppedMsg {
            id: "you".into(),
            x: 90.0,
            y: 100.0,
        }));
        assert!(!arena.player("you").unwrap().animator.is_playing());
    }

    #[test]
    fn steer_animates_local_player() {
        let mut arena = started(vec![]);
        let msg = arena.steer(DirectionKeys {
            down: true,
            ..Default::default()
        });
        assert_eq!(msg, PlayerMoveMsg { x: 0, y: 1 });
        let me = arena.local_player().unwrap();
        assert_eq!(me.animator.clip().unwrap().name, "moveBottom");
        assert!(me.animator.is_playing());
    }

    #[test]
    fn players_coast_and_stay_in_bounds() {
        let mut arena = started(vec![]);
        arena.apply(player_moved("you", 100.0, 100.0, 10.0, std::f32::consts::PI));
        arena.step(0.5);
        let x = arena.player("you").unwrap().motion.center.x;
        assert!((x - 60.4).abs() < 1e-3);
        arena.step(10.0);
        assert_eq!(arena.player("you").unwrap().motion.center.x, BODY_RADIUS);
    }

    #[test]
    fn players_are_pushed_out_of_trunks() {
        let mut arena = started(vec![tree(200.0, 100.0, TreeKind::Regular)]);
        arena.apply(player_moved("you", 200.0, 100.0, 0.0, 0.0));
        arena.step(0.016);
        let center = arena.player("you").unwrap().motion.center;
        let trunk = arena.trees()[0].layout.trunk;
        assert!(!trunk.overlaps_circle(center, BODY_RADIUS - 1e-3));
    }

    #[test]
    fn tree_fades_while_player_is_behind_it() {
        let mut arena = started(vec![tree(600.0, 500.0, TreeKind::Pine)]);
        arena.step(0.016);
        assert_eq!(arena.trees()[0].alpha, 1.0);

        let head = arena.trees()[0].layout.head.center();
        arena.apply(player_moved("you", head.x, head.y, 0.0, 0.0));
        arena.step(0.016);
        assert_eq!(arena.trees()[0].alpha, HIDDEN_TREE_ALPHA);
    }

    #[test]
    fn snowball_lifecycle_splashes_then_frees_slot() {
        let mut arena = Arena::with_pool_size(1);
        arena.apply(ServerMessage::GameStarted(Box::new(GameStartedMsg {
            id: "me".into(),
            width: 800.0,
            height: 600.0,
            player_name: "buggy".into(),
            skin: Skin::Boy,
            trees: vec![],
            players_info: vec![],
            max_snowballs: None,
        })));

        arena.apply(snowball_update(1, 50.0, 50.0, false));
        assert_eq!(arena.snowball(0).unwrap().state, SnowballState::Flying);
        arena.apply(snowball_update(2, 10.0, 10.0, false));
        assert_eq!(arena.snowball(0).unwrap().motion.center, Vec2::new(50.0, 50.0));

        arena.apply(snowball_update(1, 60.0, 50.0, true));
        let view = arena.snowball(0).unwrap();
        assert_eq!(view.state, SnowballState::Splashing);
        assert!(!view.motion.is_moving());

        arena.step(1.0);
        assert!(arena.snowball(0).is_none());
        arena.apply(snowball_update(2, 10.0, 10.0, false));
        assert_eq!(arena.snowball(0).unwrap().motion.center, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn snowball_leaving_world_is_suppressed_until_deleted() {
        let mut arena = started(vec![]);
        arena.apply(snowball_update(7, 795.0, 50.0, false));
        run_frames(&mut arena, 60, 1.0 / 60.0);
        assert!(arena.snowball(0).is_none());

        arena.apply(snowball_update(7, 900.0, 50.0, false));
        assert!(arena.snowball(0).is_none());

        arena.apply(snowball_update(7, 900.0, 50.0, true));
        arena.apply(snowball_update(7, 100.0, 50.0, false));
        assert!(arena.snowball(0).is_some());
    }

    #[test]
    fn snowball_hitting_trunk_is_killed() {
        let mut arena = started(vec![tree(300.0, 50.0, TreeKind::Regular)]);
        arena.apply(snowball_update(3, 250.0, 50.0, false));
        arena.step(0.6);
        assert!(arena.snowball(0).is_none());
    }

    #[test]
    fn scores_and_ammo_updates() {
        let mut arena = started(vec![]);
        let events = arena.apply(ServerMessage::ScoreChanged(ScoreChangedMsg {
            player_id: "you".into(),
            new_score: 4,
        }));
        assert_eq!(events, vec![ArenaEvent::ScoresChanged]);
        assert_eq!(arena.scoreboard().ranking()[0].id, "you");

        let events = arena.apply(ServerMessage::PlayerScored(PlayerScoredMsg {
            player_id: "you".into(),
            score_delta: 1,
        }));
        assert_eq!(
            events,
            vec![ArenaEvent::Scored {
                id: "you".into(),
                delta: 1,
                at: Vec2::new(100.0, 100.0),
            }]
        );

        let events = arena.apply(ServerMessage::SnowballCountChanged(
            SnowballCountChangedMsg { new_count: 2 },
        ));
        assert_eq!(events, vec![ArenaEvent::AmmoChanged { count: 2 }]);
        assert_eq!(arena.ammo(), Some(Ammo { max: 5, count: 2 }));
    }

    #[test]
    fn depth_follows_tree_bottoms() {
        let arena = started(vec![tree(100.0, 300.0, TreeKind::Regular)]);
        // "you" stands at y = 100, well above the tree: drawn behind it.
        assert!(arena.player_depth("you").unwrap() < arena.tree_depth(0));
        // "me" stands at the world center; the tree's bottom is at 316.5.
        assert!(arena.player_depth("me").unwrap() > arena.tree_depth(0));
    }

    #[test]
    fn restart_clears_previous_match() {
        let mut arena = started(vec![]);
        arena.apply(snowball_update(1, 10.0, 10.0, false));
        arena.apply(ServerMessage::GameStarted(Box::new(GameStartedMsg {
            id: "me2".into(),
            width: 100.0,
            height: 100.0,
            player_name: "x".into(),
            skin: Skin::Boy,
            trees: vec![],
            players_info: vec![],
            max_snowballs: None,
        })));
        assert_eq!(arena.players().count(), 1);
        assert!(arena.snowball(0).is_none());
        assert_eq!(arena.ammo(), None);
        assert_eq!(arena.local_id().map(String::as_str), Some("me2"));
    }

    #[test]
    fn throw_requires_started_match() {
        assert!(Arena::new().throw_at(Vec2::ONE).is_none());
        let arena = started(vec![]);
        assert_eq!(
            arena.throw_at(Vec2::new(3.0, 4.0)),
            Some(ThrowBallMsg { x: 3.0, y: 4.0 })
        );
    }
}
