//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the e1000 driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use core::ptr::NonNull;
use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::collections::HashMap;
use std::vec::Vec;

use crate::driver::error::{DmaError, DmaResult};
use crate::hal::irq::{IrqDispatcher, IrqHandler};
use crate::hal::memory::{DmaMemory, PhysAddr, PhysRange};
use crate::hal::regio::{PortBus, RegisterIo};
use crate::internal::constants::PAGE_SIZE;
use crate::internal::register::{
    EERD_ADDR_SHIFT, EERD_ADDR_SHIFT_NO_EEPROM, EERD_DATA_SHIFT, EERD_DONE, EERD_DONE_NO_EEPROM,
    EERD_OFFSET, ICR_OFFSET,
};

// =============================================================================
// Simulated e1000 Register File
// =============================================================================

/// EEPROM behind the simulated EERD register
#[derive(Debug, Clone)]
enum EepromModel {
    /// No EEPROM: EERD behaves like a plain register
    None,
    /// Serial EEPROM, answers requests in the present layout
    Serial(Vec<u16>),
    /// Emulated EEPROM, answers requests in the absent layout only
    Emulated(Vec<u16>),
}

/// Simulated e1000 register file
///
/// Implements [`RegisterIo`] directly and [`PortBus`] through the
/// IOADDR/IODATA pair at the configured base port. Writes are recorded at
/// register level regardless of the access path.
///
/// # Example
///
/// ```ignore
/// let sim = SimulatedE1000::new().with_eeprom(&[0x5452, 0x1200, 0x5634]);
/// sim.set_eeprom_latency(20);
/// assert!(detect_eeprom(&sim));
/// ```
#[derive(Debug)]
pub struct SimulatedE1000 {
    registers: RefCell<HashMap<u16, u32>>,
    write_log: RefCell<Vec<(u16, u32)>>,
    eeprom: EepromModel,
    /// EERD reads after a request that still report "not done"
    eeprom_latency: Cell<u32>,
    eeprom_reads: Cell<u32>,
    port_base: u16,
    selected: Cell<u16>,
}

impl Default for SimulatedE1000 {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedE1000 {
    pub const DEFAULT_PORT_BASE: u16 = 0xC000;

    /// Create a register file with every register zero and no EEPROM
    pub fn new() -> Self {
        Self {
            registers: RefCell::new(HashMap::new()),
            write_log: RefCell::new(Vec::new()),
            eeprom: EepromModel::None,
            eeprom_latency: Cell::new(0),
            eeprom_reads: Cell::new(0),
            port_base: Self::DEFAULT_PORT_BASE,
            selected: Cell::new(0),
        }
    }

    /// Attach a serial EEPROM holding `words`
    pub fn with_eeprom(mut self, words: &[u16]) -> Self {
        self.eeprom = EepromModel::Serial(words.to_vec());
        self
    }

    /// Attach an emulated EEPROM that only answers the absent layout
    pub fn with_eeprom_emulation(mut self, words: &[u16]) -> Self {
        self.eeprom = EepromModel::Emulated(words.to_vec());
        self
    }

    /// Set the IOADDR port; IODATA is at `base + 4`
    pub fn with_port_base(mut self, base: u16) -> Self {
        self.port_base = base;
        self
    }

    /// Number of EERD reads after each request that are not yet done
    ///
    /// `u32::MAX` never completes.
    pub fn set_eeprom_latency(&self, polls: u32) {
        self.eeprom_latency.set(polls);
    }

    /// Current register value, without read side effects
    pub fn register(&self, offset: u16) -> u32 {
        self.registers.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Set a register value without recording a write
    pub fn set_register(&self, offset: u16, value: u32) {
        self.registers.borrow_mut().insert(offset, value);
    }

    /// Latch interrupt causes into ICR
    pub fn raise(&self, causes: u32) {
        let pending = self.register(ICR_OFFSET);
        self.set_register(ICR_OFFSET, pending | causes);
    }

    /// Every write made through the driver, in order
    pub fn writes(&self) -> Vec<(u16, u32)> {
        self.write_log.borrow().clone()
    }

    /// Values written to one register, in order
    pub fn writes_to(&self, offset: u16) -> Vec<u32> {
        self.write_log
            .borrow()
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    fn read_eerd(&self) -> u32 {
        let request = self.register(EERD_OFFSET);
        let (words, shift, done) = match &self.eeprom {
            EepromModel::None => return request,
            EepromModel::Serial(words) => (words, EERD_ADDR_SHIFT, EERD_DONE),
            EepromModel::Emulated(words) => (words, EERD_ADDR_SHIFT_NO_EEPROM, EERD_DONE_NO_EEPROM),
        };

        let reads = self.eeprom_reads.get().saturating_add(1);
        self.eeprom_reads.set(reads);
        if reads <= self.eeprom_latency.get() {
            return request;
        }

        let address = ((request >> shift) & 0xFF) as usize;
        let data = words.get(address).copied().unwrap_or(0xFFFF);
        request | done | ((data as u32) << EERD_DATA_SHIFT)
    }
}

impl RegisterIo for SimulatedE1000 {
    fn read(&self, offset: u16) -> u32 {
        match offset {
            EERD_OFFSET => self.read_eerd(),
            ICR_OFFSET => self.registers.borrow_mut().insert(ICR_OFFSET, 0).unwrap_or(0),
            _ => self.register(offset),
        }
    }

    fn write(&self, offset: u16, value: u32) {
        self.write_log.borrow_mut().push((offset, value));
        if offset == EERD_OFFSET {
            self.eeprom_reads.set(0);
        }
        self.set_register(offset, value);
    }
}

impl PortBus for SimulatedE1000 {
    fn read_u32(&self, port: u16) -> u32 {
        if port == self.port_base + 4 {
            self.read(self.selected.get())
        } else {
            u32::MAX
        }
    }

    fn write_u32(&self, port: u16, value: u32) {
        if port == self.port_base {
            self.selected.set(value as u16);
        } else if port == self.port_base + 4 {
            self.write(self.selected.get(), value);
        }
    }
}

// =============================================================================
// Mock Port Bus
// =============================================================================

/// Port operation recorded by [`MockPortBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOp {
    Out(u16, u32),
    In(u16),
}

/// Mock port bus recording every `in`/`out`
///
/// Models the IOADDR/IODATA pair at `base` with a backing register map.
#[derive(Debug, Default)]
pub struct MockPortBus {
    base: u16,
    registers: RefCell<HashMap<u16, u32>>,
    selected: Cell<u16>,
    ops: RefCell<Vec<PortOp>>,
}

impl MockPortBus {
    pub fn new(base: u16) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn set_register(&self, offset: u16, value: u32) {
        self.registers.borrow_mut().insert(offset, value);
    }

    pub fn ops(&self) -> Vec<PortOp> {
        self.ops.borrow().clone()
    }
}

impl PortBus for MockPortBus {
    fn read_u32(&self, port: u16) -> u32 {
        self.ops.borrow_mut().push(PortOp::In(port));
        if port == self.base + 4 {
            self.registers
                .borrow()
                .get(&self.selected.get())
                .copied()
                .unwrap_or(0)
        } else {
            0
        }
    }

    fn write_u32(&self, port: u16, value: u32) {
        self.ops.borrow_mut().push(PortOp::Out(port, value));
        if port == self.base {
            self.selected.set(value as u16);
        } else if port == self.base + 4 {
            self.set_register(self.selected.get(), value);
        }
    }
}

// =============================================================================
// Mock DMA Memory
// =============================================================================

/// Fake physical address space: phys = virt + offset
const PHYS_OFFSET: u64 = 0x8000_0000_0000;

/// Mock kernel memory backed by page-aligned host allocations
///
/// Physical addresses are host addresses shifted by a fixed offset, so
/// descriptor addresses can be checked against buffer addresses and
/// `RDBAH`/`TDBAH` are non-zero.
#[derive(Debug, Default)]
pub struct MockDmaMemory {
    /// Physical regions: phys base -> layout
    regions: HashMap<PhysAddr, Layout>,
    /// Buffers: virt -> layout
    buffers: HashMap<usize, Layout>,
    /// MMIO windows: virt -> layout
    windows: HashMap<usize, Layout>,
    /// Register values applied to the next MMIO window
    mmio_seed: Vec<(u16, u32)>,
    mappings: usize,
    buffer_limit: Option<usize>,
    buffers_allocated: usize,
    fail_translation: bool,
}

impl MockDmaMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail buffer allocation after `limit` successful allocations
    pub fn with_buffer_limit(limit: usize) -> Self {
        let mut mem = Self::default();
        mem.buffer_limit = Some(limit);
        mem
    }

    /// Make `virt_to_phys` fail
    pub fn fail_translation(&mut self, fail: bool) {
        self.fail_translation = fail;
    }

    /// Preset a register in the next mapped MMIO window
    pub fn seed_mmio(&mut self, offset: u16, value: u32) {
        self.mmio_seed.push((offset, value));
    }

    pub fn outstanding_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn outstanding_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn outstanding_mappings(&self) -> usize {
        self.mappings
    }

    fn allocate(size: usize) -> DmaResult<(NonNull<u8>, Layout)> {
        let layout =
            Layout::from_size_align(size.max(1), PAGE_SIZE).map_err(|_| DmaError::InvalidLength)?;
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };
        NonNull::new(ptr)
            .map(|p| (p, layout))
            .ok_or(DmaError::OutOfMemory)
    }

    fn phys_of(virt: usize) -> PhysAddr {
        virt as u64 + PHYS_OFFSET
    }

    fn virt_of(phys: PhysAddr) -> usize {
        (phys - PHYS_OFFSET) as usize
    }
}

impl DmaMemory for MockDmaMemory {
    fn alloc_physical(&mut self, size: usize) -> DmaResult<PhysRange> {
        let (ptr, layout) = Self::allocate(size)?;
        let base = Self::phys_of(ptr.as_ptr() as usize);
        self.regions.insert(base, layout);
        Ok(PhysRange::new(base, size))
    }

    fn map(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>> {
        if !self.regions.contains_key(&range.base) {
            return Err(DmaError::AddressTranslation);
        }
        self.mappings += 1;
        NonNull::new(Self::virt_of(range.base) as *mut u8).ok_or(DmaError::AddressTranslation)
    }

    fn map_mmio(&mut self, range: PhysRange) -> DmaResult<NonNull<u8>> {
        let (ptr, layout) = Self::allocate(range.size)?;
        for (offset, value) in self.mmio_seed.drain(..) {
            // SAFETY: offset is inside the freshly allocated window.
            unsafe { ptr.as_ptr().add(offset as usize).cast::<u32>().write_volatile(value) };
        }
        self.windows.insert(ptr.as_ptr() as usize, layout);
        self.mappings += 1;
        Ok(ptr)
    }

    fn alloc_buffer(&mut self, size: usize) -> DmaResult<NonNull<u8>> {
        if self.buffer_limit.is_some_and(|limit| self.buffers_allocated >= limit) {
            return Err(DmaError::OutOfMemory);
        }
        let (ptr, layout) = Self::allocate(size)?;
        self.buffers.insert(ptr.as_ptr() as usize, layout);
        self.buffers_allocated += 1;
        Ok(ptr)
    }

    fn virt_to_phys(&self, virt: NonNull<u8>) -> Option<PhysAddr> {
        if self.fail_translation {
            None
        } else {
            Some(Self::phys_of(virt.as_ptr() as usize))
        }
    }

    fn free_buffer(&mut self, virt: NonNull<u8>, _size: usize) {
        if let Some(layout) = self.buffers.remove(&(virt.as_ptr() as usize)) {
            // SAFETY: allocated in alloc_buffer with this layout.
            unsafe { dealloc(virt.as_ptr(), layout) };
        }
    }

    fn unmap(&mut self, virt: NonNull<u8>, _range: PhysRange) {
        self.mappings = self.mappings.saturating_sub(1);
        if let Some(layout) = self.windows.remove(&(virt.as_ptr() as usize)) {
            // SAFETY: allocated in map_mmio with this layout.
            unsafe { dealloc(virt.as_ptr(), layout) };
        }
    }

    fn free_physical(&mut self, range: PhysRange) {
        if let Some(layout) = self.regions.remove(&range.base) {
            // SAFETY: allocated in alloc_physical with this layout.
            unsafe { dealloc(Self::virt_of(range.base) as *mut u8, layout) };
        }
    }
}

impl Drop for MockDmaMemory {
    fn drop(&mut self) {
        for (virt, layout) in self.buffers.drain().chain(self.windows.drain()) {
            // SAFETY: every entry was allocated with its recorded layout.
            unsafe { dealloc(virt as *mut u8, layout) };
        }
        for (phys, layout) in self.regions.drain() {
            // SAFETY: as above.
            unsafe { dealloc(Self::virt_of(phys) as *mut u8, layout) };
        }
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Mock IRQ Dispatcher
// =============================================================================

/// Records handler registrations
#[derive(Debug, Default)]
pub struct MockIrqDispatcher {
    pub registered: Vec<(u8, IrqHandler)>,
}

impl MockIrqDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every handler registered for `irq`
    pub fn fire(&self, irq: u8) {
        for (line, handler) in &self.registered {
            if *line == irq {
                handler();
            }
        }
    }
}

impl IrqDispatcher for MockIrqDispatcher {
    fn register(&mut self, irq: u8, handler: IrqHandler) {
        self.registered.push((irq, handler));
    }
}
