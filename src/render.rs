//! Render-facing snapshots
//!
//! The renderer never reads simulation state directly; each frame it gets a
//! [`FrameSnapshot`] copied out after the tick finished, so it cannot observe
//! a half-updated platform set.

use serde::{Deserialize, Serialize};

use crate::session::SessionPhase;
use crate::sim::{Ball, Platform, PlatformKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            vx: ball.vel.x,
            vy: ball.vel.y,
            width: ball.size.x,
            height: ball.size.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Static,
    Moving,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformView {
    pub id: u32,
    pub kind: PlatformTag,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Platform> for PlatformView {
    fn from(platform: &Platform) -> Self {
        let kind = match platform.kind {
            PlatformKind::Static => PlatformTag::Static,
            PlatformKind::Moving { .. } => PlatformTag::Moving,
        };
        Self {
            id: platform.id,
            kind,
            x: platform.pos.x,
            y: platform.pos.y,
            width: platform.size.x,
            height: platform.size.y,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    /// Absent outside a run
    pub ball: Option<BallView>,
    pub platforms: Vec<PlatformView>,
    pub score: u64,
    pub level: u32,
    /// Reward outcome line, once a qualifying run has been reported
    pub status: Option<String>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
