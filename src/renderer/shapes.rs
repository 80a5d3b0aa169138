//! Shape generation for 2D primitives
//!
//! Everything is drawn as axis-aligned quads in world coordinates
//! (origin top-left, y down); the pipeline maps them to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Aabb, CollectibleKind, ObstacleKind, Snapshot, Tint};

/// Lane divider width
const LANE_LINE_WIDTH: f32 = 2.0;
/// Side length of a particle square
const PARTICLE_SIZE: f32 = 3.0;
/// Peak extra scale of the collectible pulse
const PULSE_AMPLITUDE: f32 = 0.2;
/// Player opacity while invincible
const INVINCIBLE_ALPHA: f32 = 0.5;

/// Two triangles covering `[min, max]`
pub fn rect(vertices: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(min.x, min.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));

    vertices.push(Vertex::new(min.x, max.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(max.x, max.y, color));
}

fn fill(vertices: &mut Vec<Vertex>, aabb: Aabb, color: [f32; 4]) {
    rect(vertices, aabb.min, aabb.max, color);
}

pub fn obstacle_color(kind: ObstacleKind) -> [f32; 4] {
    match kind {
        ObstacleKind::Car => colors::CAR,
        ObstacleKind::Construction => colors::CONSTRUCTION,
        ObstacleKind::Bird => colors::BIRD,
    }
}

pub fn collectible_color(kind: CollectibleKind) -> [f32; 4] {
    match kind {
        CollectibleKind::Currency => colors::CURRENCY,
        CollectibleKind::Health => colors::HEALTH,
        CollectibleKind::Boost => colors::BOOST,
    }
}

pub fn tint_color(tint: Tint) -> [f32; 4] {
    match tint {
        Tint::Hazard => colors::CAR,
        Tint::Enemy => colors::ENEMY,
        Tint::Collectible(kind) => collectible_color(kind),
    }
}

/// Dividers halfway between adjacent lanes
pub fn lane_lines(vertices: &mut Vec<Vertex>) {
    for pair in LANES.windows(2) {
        let x = (pair[0] + pair[1]) / 2.0;
        rect(
            vertices,
            Vec2::new(x - LANE_LINE_WIDTH / 2.0, 0.0),
            Vec2::new(x + LANE_LINE_WIDTH / 2.0, WORLD_HEIGHT),
            colors::LANE_LINE,
        );
    }
}

/// Build the full frame: lanes, hazards, pickups, enemies, player, particles
pub fn scene(snapshot: &Snapshot) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        6 * (LANES.len()
            + snapshot.obstacles.len()
            + snapshot.collectibles.len()
            + snapshot.enemies.len()
            + snapshot.particles.len()
            + 1),
    );

    lane_lines(&mut vertices);

    for obstacle in snapshot.obstacles {
        fill(&mut vertices, obstacle.aabb(), obstacle_color(obstacle.kind));
    }

    for collectible in snapshot.collectibles {
        let scale = 1.0 + collectible.pulse.sin() * PULSE_AMPLITUDE;
        let aabb = Aabb::from_center(collectible.pos, collectible.size * scale);
        fill(&mut vertices, aabb, collectible_color(collectible.kind));
    }

    for enemy in snapshot.enemies {
        fill(&mut vertices, enemy.aabb(), colors::ENEMY);
    }

    let mut player_color = colors::PLAYER;
    if snapshot.player.invincible {
        player_color[3] = INVINCIBLE_ALPHA;
    }
    fill(&mut vertices, snapshot.player.aabb(), player_color);

    for particle in snapshot.particles {
        let mut color = tint_color(particle.tint);
        color[3] = particle.life as f32 / PARTICLE_LIFE as f32;
        let aabb = Aabb::from_center(particle.pos, Vec2::splat(PARTICLE_SIZE));
        fill(&mut vertices, aabb, color);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Profile;
    use crate::sim::{Collectible, GameState, Particle};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(8, Profile::default(), Tuning::default())
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let mut vertices = Vec::new();
        rect(&mut vertices, Vec2::ZERO, Vec2::new(10.0, 5.0), colors::CAR);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == colors::CAR));
    }

    #[test]
    fn test_lane_lines_between_lanes() {
        let mut vertices = Vec::new();
        lane_lines(&mut vertices);
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].position[0], 161.5);
        assert_eq!(vertices[1].position[0], 163.5);
        assert_eq!(vertices[6].position[0], 226.5);
    }

    #[test]
    fn test_empty_scene_has_lanes_and_player() {
        let state = state();
        let vertices = scene(&state.snapshot());
        assert_eq!(vertices.len(), 6 * 3);
        assert!(vertices[12..].iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_invincible_player_is_translucent() {
        let mut state = state();
        state.player.invincible = true;
        let vertices = scene(&state.snapshot());
        assert_eq!(vertices[12].color[3], INVINCIBLE_ALPHA);
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut state = state();
        state.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            tint: Tint::Collectible(CollectibleKind::Boost),
            life: PARTICLE_LIFE / 2,
        });
        let vertices = scene(&state.snapshot());
        let last = vertices[vertices.len() - 1];
        assert_eq!(last.color[3], 0.5);
        assert_eq!(&last.color[..3], &colors::BOOST[..3]);
    }

    #[test]
    fn test_collectible_pulse_peaks_at_fifth_larger() {
        let mut state = state();
        state.collectibles.push(Collectible {
            id: 1,
            kind: CollectibleKind::Currency,
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::new(20.0, 20.0),
            pulse: std::f32::consts::FRAC_PI_2,
        });
        let vertices = scene(&state.snapshot());
        let xs: Vec<f32> = vertices[12..18].iter().map(|v| v.position[0]).collect();
        let min = xs.iter().copied().fold(f32::MAX, f32::min);
        let max = xs.iter().copied().fold(f32::MIN, f32::max);
        let width = max - min;
        assert!((width - 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(colors::hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors::LANE_LINE[3], 0.3);
    }
}
