//! Monotonic cycle counter.
//!
//! Every bus access costs exactly one PHI2 cycle. The clock itself does no
//! pacing — it is a pure counter the CPU advances and peripherals read back
//! to drive their own timers (CIA TOD divider, VIC-II raster).

pub type Cycle = u64;

/// The level of interrupt a peripheral is requesting, ordered by priority.
/// `None < Irq < Nmi < Brk`: a higher level always preempts a lower one that
/// is still pending when the CPU next checks between instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IrqLevel {
    #[default]
    None,
    Irq,
    Nmi,
    Brk,
}

pub struct Clock {
    cycle: Cycle,
}

impl Clock {
    pub fn new() -> Self {
        Self { cycle: 0 }
    }

    pub fn reset(&mut self) {
        self.cycle = 0;
    }

    /// Advance the counter by one PHI2 cycle. Every bus access through
    /// [`crate::c64_emu::machine::Machine`]'s `Access` calls this once and
    /// ticks the multiplex's peripherals in the same step, so a cycle and a
    /// bus access are always in lockstep.
    pub fn wait_cycle(&mut self) -> Cycle {
        self.cycle += 1;
        self.cycle
    }

    pub fn now(&self) -> Cycle {
        self.cycle
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
