//! Memory layout constants for the resolved game structures.
//!
//! Field offsets are byte offsets applied to a base address produced by a
//! registry; consumers pass them to the registry accessors as plain
//! integers.

/// Layout of the global time-scale float array.
pub mod time_scale {
    /// f32 slot width.
    pub const SLOT: u64 = 4;

    /// Slot 0: the scale this mod last requested, read back for confirmation.
    pub const REQUESTED: u64 = 0;

    /// Slot 2: the scale currently applied by the simulation.
    pub const EFFECTIVE: u64 = SLOT * 2;
}

/// Field offsets inside a vehicle's handling data block.
///
/// The block is reached through one pointer indirection from the vehicle
/// object (see `HandlingRegistry`); all fields are 32-bit floats.
pub mod handling {
    pub const MASS: u64 = 0xDC;
    pub const INITIAL_DRAG_COEFF: u64 = 0xE0;
    pub const INITIAL_DRIVE_FORCE: u64 = 0x13C;
    pub const BRAKE_FORCE: u64 = 0x14C;
}
