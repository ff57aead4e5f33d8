//! Interrupt dispatch HAL
//!
//! The kernel owns the interrupt table; the driver only asks for its
//! handler to be called when the device's IRQ line fires.

/// Handler invoked by the kernel's dispatcher, with no arguments
pub type IrqHandler = fn();

/// Kernel interrupt dispatch table
pub trait IrqDispatcher {
    /// Route `irq` to `handler`
    fn register(&mut self, irq: u8, handler: IrqHandler);
}

impl<D: IrqDispatcher + ?Sized> IrqDispatcher for &mut D {
    fn register(&mut self, irq: u8, handler: IrqHandler) {
        (**self).register(irq, handler);
    }
}
