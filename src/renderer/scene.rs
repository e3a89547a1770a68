//! Scene assembly
//!
//! Turns a read-only `GameSession` into a triangle list in field
//! coordinates. No game logic lives here.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::shapes::{circle, ellipse, gradient_rect, line, polygon, ring, with_alpha};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Ball, GameSession, GoalRect, ShotPhase};

/// Ghost copies drawn behind a moving ball
pub const TRAIL_GHOSTS: u32 = 6;
/// Ghost spacing, in steps of velocity
const TRAIL_SPACING: f32 = 8.0;
/// Trail only shows above this axis speed
const TRAIL_MIN_SPEED: f32 = 1.0;

/// Build the full frame for `session`
pub fn build_scene(session: &GameSession, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(4096);

    push_backdrop(&mut vertices);
    push_goal(&mut vertices, &session.goal);
    vertices.extend(circle(PENALTY_SPOT, 4.0, colors::LINE, 12));

    if settings.effective_trails() {
        push_trail(&mut vertices, &session.ball, segments);
    }
    push_ball(&mut vertices, &session.ball, settings);

    if settings.aim_guide && session.phase == ShotPhase::Aim {
        if let (Some(_), Some(end)) = (session.gesture.start, session.gesture.end) {
            vertices.extend(line(session.ball.pos, end, 3.0, colors::AIM_GUIDE));
            vertices.extend(circle(end, 5.0, colors::AIM_GUIDE, 12));
        }
    }

    vertices
}

/// Sky, pitch and pitch markings
fn push_backdrop(out: &mut Vec<Vertex>) {
    let horizon = FIELD_HEIGHT * HORIZON;
    out.extend(gradient_rect(
        Vec2::ZERO,
        Vec2::new(FIELD_WIDTH, horizon),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));
    out.extend(gradient_rect(
        Vec2::new(0.0, horizon),
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        colors::PITCH_TOP,
        colors::PITCH_BOTTOM,
    ));

    for y in [FIELD_HEIGHT * 0.75, FIELD_HEIGHT * 0.9] {
        out.extend(line(
            Vec2::new(0.0, y),
            Vec2::new(FIELD_WIDTH, y),
            2.0,
            colors::LINE,
        ));
    }
}

/// Net, frame and posts
fn push_goal(out: &mut Vec<Vertex>, goal: &GoalRect) {
    let top_left = Vec2::new(goal.left(), goal.top());
    let top_right = Vec2::new(goal.right(), goal.top());
    let bottom_left = Vec2::new(goal.left(), goal.bottom());
    let bottom_right = Vec2::new(goal.right(), goal.bottom());

    let (rows, cols) = goal.net_lines(5);
    for y in rows {
        out.extend(line(
            Vec2::new(goal.left(), y),
            Vec2::new(goal.right(), y),
            1.0,
            colors::NET,
        ));
    }
    for x in cols {
        out.extend(line(
            Vec2::new(x, goal.top()),
            Vec2::new(x, goal.bottom()),
            1.0,
            colors::NET,
        ));
    }
    out.extend(line(bottom_left, bottom_right, 2.0, colors::NET));

    // Posts and crossbar
    out.extend(line(bottom_left, top_left, 8.0, colors::POST));
    out.extend(line(top_left, top_right, 8.0, colors::POST));
    out.extend(line(top_right, bottom_right, 8.0, colors::POST));
}

/// Fading ghosts behind the ball, derived from its velocity
fn push_trail(out: &mut Vec<Vertex>, ball: &Ball, segments: u32) {
    if !ball.moving || ball.max_axis_speed() <= TRAIL_MIN_SPEED {
        return;
    }

    for i in 1..=TRAIL_GHOSTS {
        let t = i as f32 / TRAIL_GHOSTS as f32;
        let center = ball.pos - ball.vel * TRAIL_SPACING * t;
        let shrink = 1.0 - t * 0.5;
        let radii = Vec2::new(ball.radius * shrink, ball.radius * 0.7 * shrink);
        out.extend(ellipse(
            center,
            radii,
            with_alpha(colors::TRAIL, 0.15 * (1.0 - t)),
            segments,
        ));
    }
}

/// Ball with shadow, outline and panels
fn push_ball(out: &mut Vec<Vertex>, ball: &Ball, settings: &Settings) {
    let segments = settings.quality.circle_segments();
    let r = ball.radius;

    out.extend(circle(ball.pos + Vec2::splat(3.0), r + 2.0, colors::SHADOW, segments));
    out.extend(circle(ball.pos, r, colors::BALL, segments));
    out.extend(ring(ball.pos, r - 2.0, r, colors::BALL_OUTLINE, segments));

    if !settings.quality.ball_panels() {
        return;
    }

    // Panels turn with the direction of travel
    let spin = ball.vel.y.atan2(ball.vel.x) / 2.0;
    out.extend(polygon(
        ball.pos,
        r * 0.45,
        5,
        spin - FRAC_PI_2,
        colors::BALL_PANEL,
    ));
    for k in 0..5 {
        let theta = spin - FRAC_PI_2 + PI / 5.0 + k as f32 * TAU / 5.0;
        let center = ball.pos + Vec2::new(theta.cos(), theta.sin()) * r * 0.78;
        out.extend(circle(center, r * 0.16, colors::BALL_PANEL, 8));
    }
}
