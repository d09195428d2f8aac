//! Flavour text shown around a run

use rand::Rng;

const BRIEFINGS: [&str; 5] = [
    "Localized debris field detected. Calibrating shield resonance.",
    "Gravitational anomalies detected in Sector 4. Manual override required.",
    "Warning: High-speed kinetic projectiles approaching your vector.",
    "Awaiting pilot confirmation. Systems green. Engage when ready.",
    "Simulation cycle 1042-B ready. Difficulty curve optimized.",
];

/// Pick a pre-run briefing line
pub fn briefing<R: Rng>(rng: &mut R) -> &'static str {
    BRIEFINGS[rng.random_range(0..BRIEFINGS.len())]
}

/// Post-run report, tiered by final score
pub fn debrief(score: u64) -> &'static str {
    match score {
        0..500 => "Simulation terminated. Pilot reflexes below threshold.",
        500..1500 => "Acceptable performance. Telemetry logged for review.",
        1500..3000 => "Excellent evasion patterns. You're exceeding expectations.",
        _ => "Elite status confirmed. Records shattered. Godspeed, Commander.",
    }
}
