//! Headless model of the in-browser animation loop.
//!
//! The browser sketches keep their state in script globals; here the same
//! state is one owned [`SimulationState`] advanced by explicit calls to
//! [`SimulationState::step`]. The CLI uses it to check how a variant's caps
//! and rates behave over time without opening a browser.

use crate::domain::model::SketchParams;
use serde::Serialize;
use std::collections::VecDeque;

const PARTICLE_LIFE: f64 = 255.0;
const PARTICLE_SPEED: f64 = 2.0;
const HUE_RATE: f64 = 40.0;
const HUE_JITTER: f64 = 30.0;
const TWINKLE_RATE: f64 = 0.1;
const RIPPLE_GROWTH: f64 = 3.0;
const RIPPLE_FADE: f64 = 4.0;

/// Seeded xorshift64* generator. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SimRng(u64);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        // FNV-1a over the seed bytes so that small seeds still spread out
        let mut h = 0xcbf2_9ce4_8422_2325u64;
        for b in seed.to_le_bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01B3);
        }
        Self(if h == 0 { 0x9E37_79B9_7F4A_7C15 } else { h })
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
    /// A press started on this frame.
    pub clicked: bool,
}

impl PointerInput {
    /// Deterministic pointer pattern: the pointer circles the center, is held
    /// down for half of every two-second window and clicks twice a second.
    pub fn scripted(frame: u64, viewport: Viewport) -> Self {
        let angle = frame as f64 * 0.05;
        let radius = viewport.width.min(viewport.height) * 0.3;
        Self {
            x: viewport.width / 2.0 + radius * angle.cos(),
            y: viewport.height / 2.0 + radius * angle.sin(),
            pressed: frame % 120 < 60,
            clicked: frame % 30 == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub hue: f64,
    pub life: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub phase: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub frame: u64,
    pub time: f64,
    pub hue_offset: f64,
    pub particles: usize,
    pub peak_particles: usize,
    pub stars: usize,
    pub ripples: usize,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    params: SketchParams,
    viewport: Viewport,
    rng: SimRng,
    frame: u64,
    time: f64,
    hue_offset: f64,
    noise_offset: f64,
    peak_particles: usize,
    particles: VecDeque<Particle>,
    stars: Vec<Star>,
    ripples: VecDeque<Ripple>,
}

impl SimulationState {
    pub fn new(params: &SketchParams, viewport: Viewport, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let stars = (0..params.star_count)
            .map(|_| {
                let z = rng.range(0.0, viewport.width);
                spawn_star(&mut rng, viewport, z)
            })
            .collect();

        Self {
            params: params.clone(),
            viewport,
            rng,
            frame: 0,
            time: 0.0,
            hue_offset: 0.0,
            noise_offset: 0.0,
            peak_particles: 0,
            particles: VecDeque::with_capacity(params.particle_cap),
            stars,
            ripples: VecDeque::new(),
        }
    }

    /// Advance one display refresh.
    pub fn step(&mut self, input: &PointerInput) {
        self.frame += 1;
        self.time += self.params.noise_speed;
        self.hue_offset = (self.time * HUE_RATE) % 360.0;
        self.noise_offset = self.frame as f64 * self.params.noise_speed;

        self.step_particles(input);
        self.step_stars(input);
        self.step_ripples(input);
    }

    fn step_particles(&mut self, input: &PointerInput) {
        if input.pressed {
            for _ in 0..self.params.spawn_per_frame {
                let jitter = self.rng.range(-HUE_JITTER, HUE_JITTER);
                let hue = (self.hue_offset + jitter + 360.0) % 360.0;
                let particle = Particle {
                    x: input.x,
                    y: input.y,
                    vx: self.rng.range(-PARTICLE_SPEED, PARTICLE_SPEED),
                    vy: self.rng.range(-PARTICLE_SPEED, PARTICLE_SPEED),
                    hue,
                    life: PARTICLE_LIFE,
                };
                self.particles.push_back(particle);
            }
            // 超過上限時先丟最舊的
            while self.particles.len() > self.params.particle_cap {
                self.particles.pop_front();
            }
        }

        let decay = self.params.particle_decay;
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= decay;
            p.life > 0.0
        });

        self.peak_particles = self.peak_particles.max(self.particles.len());
    }

    fn step_stars(&mut self, input: &PointerInput) {
        let s = self.params.star_speed;
        let t = (input.x / self.viewport.width).clamp(0.0, 1.0);
        let speed = s * 0.25 + (s * 2.0 - s * 0.25) * t;

        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            star.z -= speed;
            star.phase += TWINKLE_RATE;
            if star.z <= 0.0 {
                let fresh = spawn_star(&mut self.rng, self.viewport, self.viewport.width);
                self.stars[i] = fresh;
            }
        }
    }

    fn step_ripples(&mut self, input: &PointerInput) {
        if input.clicked {
            self.ripples.push_back(Ripple {
                x: input.x,
                y: input.y,
                radius: 0.0,
                alpha: 255.0,
            });
            while self.ripples.len() > self.params.ripple_cap {
                self.ripples.pop_front();
            }
        }

        self.ripples.retain_mut(|r| {
            r.radius += RIPPLE_GROWTH;
            r.alpha -= RIPPLE_FADE;
            r.alpha > 0.0
        });
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            frame: self.frame,
            time: self.time,
            hue_offset: self.hue_offset,
            particles: self.particles.len(),
            peak_particles: self.peak_particles,
            stars: self.stars.len(),
            ripples: self.ripples.len(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn noise_offset(&self) -> f64 {
        self.noise_offset
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }
}

fn spawn_star(rng: &mut SimRng, viewport: Viewport, z: f64) -> Star {
    Star {
        x: rng.range(-viewport.width, viewport.width),
        y: rng.range(-viewport.height, viewport.height),
        z,
        phase: rng.range(0.0, std::f64::consts::TAU),
    }
}

/// Run `frames` steps with the scripted pointer and return the final stats.
pub fn run_scripted(
    params: &SketchParams,
    viewport: Viewport,
    seed: u64,
    frames: u64,
) -> SimulationState {
    let mut state = SimulationState::new(params, viewport, seed);
    for frame in 0..frames {
        let input = PointerInput::scripted(frame, viewport);
        state.step(&input);
    }
    state
}
