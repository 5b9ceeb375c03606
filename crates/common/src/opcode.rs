//! Opcode definitions and the byte → opcode decode table.
//!
//! PUSH, DUP and SWAP carry their parameter in the byte value itself
//! (`PUSH1 = 0x60 .. PUSH32 = 0x7F` and so on). The table below resolves
//! every byte once, at compile time, into a structured [`Opcode`] so the
//! interpreter never does range arithmetic on raw bytes.

use crate::error::DecodeError;

/// Byte value of STOP.
pub const STOP: u8 = 0x00;
/// Byte value of ADD.
pub const ADD: u8 = 0x01;
/// Byte value of MUL.
pub const MUL: u8 = 0x02;
/// Byte value of SUB.
pub const SUB: u8 = 0x03;
/// Byte value of POP.
pub const POP: u8 = 0x50;
/// Byte value of MSTORE.
pub const MSTORE: u8 = 0x52;
/// Byte value of PUSH1. PUSHn is `PUSH1 + n - 1`.
pub const PUSH1: u8 = 0x60;
/// Byte value of PUSH32.
pub const PUSH32: u8 = 0x7F;
/// Byte value of DUP1. DUPn is `DUP1 + n - 1`.
pub const DUP1: u8 = 0x80;
/// Byte value of DUP16.
pub const DUP16: u8 = 0x8F;
/// Byte value of SWAP1. SWAPn is `SWAP1 + n - 1`.
pub const SWAP1: u8 = 0x90;
/// Byte value of SWAP16.
pub const SWAP16: u8 = 0x9F;
/// Byte value of RETURN.
pub const RETURN: u8 = 0xF3;

/// An implemented instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Terminate the current invocation without return data.
    Stop,
    /// Pop B, pop A, push A + B.
    Add,
    /// Pop B, pop A, push A * B.
    Mul,
    /// Pop B, pop A, push A - B.
    Sub,
    /// Discard the top of stack.
    Pop,
    /// Pop offset, pop value, write value big-endian to memory.
    MStore,
    /// Push an immediate of the given width (1..=32 bytes).
    ///
    /// Widths outside that range have no encoding; build with
    /// [`Opcode::push`] when the width is not a constant.
    Push(u8),
    /// Duplicate the Nth stack element (1..=16, 1 = top). See [`Opcode::dup`].
    Dup(u8),
    /// Swap the top with the element N below it (1..=16). See [`Opcode::swap`].
    Swap(u8),
    /// Pop offset, pop size, return that memory range and terminate.
    Return,
}

/// Number of implemented opcodes (7 fixed + 32 PUSH + 16 DUP + 16 SWAP).
pub const OPCODE_COUNT: usize = 71;

/// All implemented opcodes, ordered by byte value.
pub const ALL_OPCODES: [Opcode; OPCODE_COUNT] = build_all_opcodes();

static DECODE_TABLE: [Option<Opcode>; 256] = build_decode_table();

const fn build_decode_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    table[STOP as usize] = Some(Opcode::Stop);
    table[ADD as usize] = Some(Opcode::Add);
    table[MUL as usize] = Some(Opcode::Mul);
    table[SUB as usize] = Some(Opcode::Sub);
    table[POP as usize] = Some(Opcode::Pop);
    table[MSTORE as usize] = Some(Opcode::MStore);
    table[RETURN as usize] = Some(Opcode::Return);

    let mut n = 1u8;
    while n <= 32 {
        table[(PUSH1 + n - 1) as usize] = Some(Opcode::Push(n));
        n += 1;
    }

    let mut n = 1u8;
    while n <= 16 {
        table[(DUP1 + n - 1) as usize] = Some(Opcode::Dup(n));
        table[(SWAP1 + n - 1) as usize] = Some(Opcode::Swap(n));
        n += 1;
    }

    table
}

const fn build_all_opcodes() -> [Opcode; OPCODE_COUNT] {
    let table = build_decode_table();
    let mut all = [Opcode::Stop; OPCODE_COUNT];
    let mut next = 0;
    let mut byte = 0;
    while byte < 256 {
        if let Some(op) = table[byte] {
            all[next] = op;
            next += 1;
        }
        byte += 1;
    }
    all
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DECODE_TABLE[value as usize].ok_or(DecodeError::UnsupportedOpcode(value))
    }
}

const PUSH_MNEMONICS: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_MNEMONICS: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_MNEMONICS: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

impl Opcode {
    /// PUSHn, if `1 <= width <= 32`.
    pub const fn push(width: u8) -> Option<Opcode> {
        match width {
            1..=32 => Some(Opcode::Push(width)),
            _ => None,
        }
    }

    /// DUPn, if `1 <= n <= 16`.
    pub const fn dup(n: u8) -> Option<Opcode> {
        match n {
            1..=16 => Some(Opcode::Dup(n)),
            _ => None,
        }
    }

    /// SWAPn, if `1 <= n <= 16`.
    pub const fn swap(n: u8) -> Option<Opcode> {
        match n {
            1..=16 => Some(Opcode::Swap(n)),
            _ => None,
        }
    }

    /// The byte this opcode is encoded as.
    ///
    /// # Panics
    ///
    /// On a `Push`, `Dup` or `Swap` parameter outside its encodable range.
    pub fn byte(&self) -> u8 {
        match *self {
            Opcode::Stop => STOP,
            Opcode::Add => ADD,
            Opcode::Mul => MUL,
            Opcode::Sub => SUB,
            Opcode::Pop => POP,
            Opcode::MStore => MSTORE,
            Opcode::Push(n) => PUSH1 + n - 1,
            Opcode::Dup(n) => DUP1 + n - 1,
            Opcode::Swap(n) => SWAP1 + n - 1,
            Opcode::Return => RETURN,
        }
    }

    /// Returns the assembly mnemonic for this opcode.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`byte`](Self::byte).
    pub fn mnemonic(&self) -> &'static str {
        match *self {
            Opcode::Stop => "STOP",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Sub => "SUB",
            Opcode::Pop => "POP",
            Opcode::MStore => "MSTORE",
            Opcode::Push(n) => PUSH_MNEMONICS[n as usize - 1],
            Opcode::Dup(n) => DUP_MNEMONICS[n as usize - 1],
            Opcode::Swap(n) => SWAP_MNEMONICS[n as usize - 1],
            Opcode::Return => "RETURN",
        }
    }

    /// Number of immediate bytes following the opcode byte.
    pub fn immediate_len(&self) -> usize {
        match *self {
            Opcode::Push(n) => n as usize,
            _ => 0,
        }
    }

    /// Minimum stack height required before the opcode runs.
    pub fn stack_inputs(&self) -> usize {
        match *self {
            Opcode::Stop | Opcode::Push(_) => 0,
            Opcode::Pop => 1,
            Opcode::Add | Opcode::Mul | Opcode::Sub | Opcode::MStore | Opcode::Return => 2,
            Opcode::Dup(n) => n as usize,
            Opcode::Swap(n) => n as usize + 1,
        }
    }

    /// Number of stack slots holding the opcode's results, counted from the
    /// top, after it runs. Together with [`stack_inputs`](Self::stack_inputs)
    /// this gives the net height change.
    pub fn stack_outputs(&self) -> usize {
        match *self {
            Opcode::Stop | Opcode::Pop | Opcode::MStore | Opcode::Return => 0,
            Opcode::Add | Opcode::Mul | Opcode::Sub | Opcode::Push(_) => 1,
            Opcode::Dup(n) => n as usize + 1,
            Opcode::Swap(n) => n as usize + 1,
        }
    }

    /// Returns true for opcodes that end the current invocation.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Opcode::Stop | Opcode::Return)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
