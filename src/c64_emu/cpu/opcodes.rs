//! The 256-entry opcode table and the instruction bodies it dispatches to.
//!
//! Decode is a pure function of the opcode byte: `TABLE[opcode]` names a
//! handler, an addressing mode, and a nominal cycle count, with no other
//! state involved. Illegal/undocumented opcodes beyond the twelve
//! documented JAM codes are not individually modeled (see spec Non-goals);
//! every other unassigned slot decodes to [`ops::undefined`], a one-cycle
//! no-op that reports a fault rather than mutating state.

use super::addressing::{set_nz, AddressingMode, Operand};
use super::{flags, Cpu, CpuMemory};

pub type OpFn = fn(&mut Cpu, &mut dyn CpuMemory, Operand);

#[derive(Clone, Copy)]
pub struct Instr {
    pub op: OpFn,
    pub mode: AddressingMode,
    pub cycles: u8,
}

const fn i(op: OpFn, mode: AddressingMode, cycles: u8) -> Instr {
    Instr { op, mode, cycles }
}

use AddressingMode::*;

pub mod ops {
    use super::*;

    // ── Loads / stores ─────────────────────────────────────────
    pub fn lda(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.a = op.load(cpu, mem);
        set_nz(cpu, cpu.a);
    }
    pub fn ldx(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.x = op.load(cpu, mem);
        set_nz(cpu, cpu.x);
    }
    pub fn ldy(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.y = op.load(cpu, mem);
        set_nz(cpu, cpu.y);
    }
    pub fn sta(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let a = cpu.a;
        op.store(cpu, mem, a);
    }
    pub fn stx(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let x = cpu.x;
        op.store(cpu, mem, x);
    }
    pub fn sty(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let y = cpu.y;
        op.store(cpu, mem, y);
    }

    // ── Register transfers ─────────────────────────────────────
    pub fn tax(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.x = cpu.a;
        set_nz(cpu, cpu.x);
    }
    pub fn tay(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.y = cpu.a;
        set_nz(cpu, cpu.y);
    }
    pub fn txa(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.a = cpu.x;
        set_nz(cpu, cpu.a);
    }
    pub fn tya(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.a = cpu.y;
        set_nz(cpu, cpu.a);
    }
    pub fn tsx(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.x = cpu.sp;
        set_nz(cpu, cpu.x);
    }
    pub fn txs(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.sp = cpu.x;
    }

    // ── Stack ───────────────────────────────────────────────────
    pub fn pha(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        let a = cpu.a;
        cpu.push(mem, a);
    }
    pub fn php(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        let status = cpu.p | flags::BREAK | flags::RESERVED;
        cpu.push(mem, status);
    }
    pub fn pla(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.a = cpu.pop(mem);
        set_nz(cpu, cpu.a);
    }
    pub fn plp(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        let popped = cpu.pop(mem);
        cpu.p = (popped | flags::RESERVED) & !flags::BREAK;
    }

    // ── Arithmetic ──────────────────────────────────────────────
    pub fn adc(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let m = op.load(cpu, mem);
        let a = cpu.a;
        let c = cpu.flag(flags::CARRY) as u8;
        if cpu.flag(flags::DECIMAL) {
            decimal_adc(cpu, a, m, c);
        } else {
            binary_adc(cpu, a, m, c);
        }
    }

    fn binary_adc(cpu: &mut Cpu, a: u8, m: u8, c: u8) {
        let sum = a as u16 + m as u16 + c as u16;
        let result = sum as u8;
        cpu.set_flag(flags::CARRY, sum > 0xFF);
        cpu.set_flag(flags::OVERFLOW, (!(a ^ m) & (a ^ result) & 0x80) != 0);
        set_nz(cpu, result);
        cpu.a = result;
    }

    /// BCD add: the result stored in A is corrected to valid BCD digits,
    /// but N/Z/V are taken from the *uncorrected* binary sum, matching
    /// NMOS 6502 decimal-mode flag behavior.
    fn decimal_adc(cpu: &mut Cpu, a: u8, m: u8, c: u8) {
        let bin = a.wrapping_add(m).wrapping_add(c);
        set_nz(cpu, bin);
        cpu.set_flag(flags::OVERFLOW, (!(a ^ m) & (a ^ bin) & 0x80) != 0);

        let mut al = (a & 0x0F) + (m & 0x0F) + c;
        if al > 9 {
            al += 6;
        }
        let mut ah = (a >> 4) + (m >> 4) + u8::from(al > 0x0F);
        if ah > 9 {
            ah += 6;
        }
        cpu.set_flag(flags::CARRY, ah > 0x0F);
        cpu.a = (ah << 4) | (al & 0x0F);
    }

    pub fn sbc(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let m = op.load(cpu, mem);
        let a = cpu.a;
        let c = cpu.flag(flags::CARRY) as i16;
        if cpu.flag(flags::DECIMAL) {
            decimal_sbc(cpu, a, m, c);
        } else {
            binary_sbc(cpu, a, m, c);
        }
    }

    fn binary_sbc(cpu: &mut Cpu, a: u8, m: u8, c: i16) {
        let value = a as i16 - m as i16 - (1 - c);
        let result = value as u8;
        cpu.set_flag(flags::CARRY, value >= 0);
        cpu.set_flag(flags::OVERFLOW, ((a ^ m) & (a ^ result) & 0x80) != 0);
        set_nz(cpu, result);
        cpu.a = result;
    }

    fn decimal_sbc(cpu: &mut Cpu, a: u8, m: u8, c: i16) {
        let borrow = 1 - c;
        let bin_value = a as i16 - m as i16 - borrow;
        let bin_result = bin_value as u8;
        set_nz(cpu, bin_result);
        cpu.set_flag(flags::OVERFLOW, ((a ^ m) & (a ^ bin_result) & 0x80) != 0);
        cpu.set_flag(flags::CARRY, bin_value >= 0);

        let mut al = (a as i16 & 0x0F) - (m as i16 & 0x0F) - borrow;
        if al < 0 {
            al -= 6;
        }
        let mut ah = (a as i16 >> 4) - (m as i16 >> 4) - i16::from(al < 0);
        if ah < 0 {
            ah -= 6;
        }
        cpu.a = (((ah & 0x0F) << 4) | (al & 0x0F)) as u8;
    }

    // ── Increment / decrement ───────────────────────────────────
    pub fn inc(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem).wrapping_add(1);
        op.store(cpu, mem, value);
        set_nz(cpu, value);
    }
    pub fn dec(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem).wrapping_sub(1);
        op.store(cpu, mem, value);
        set_nz(cpu, value);
    }
    pub fn inx(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.x = cpu.x.wrapping_add(1);
        set_nz(cpu, cpu.x);
    }
    pub fn iny(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.y = cpu.y.wrapping_add(1);
        set_nz(cpu, cpu.y);
    }
    pub fn dex(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.x = cpu.x.wrapping_sub(1);
        set_nz(cpu, cpu.x);
    }
    pub fn dey(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.y = cpu.y.wrapping_sub(1);
        set_nz(cpu, cpu.y);
    }

    // ── Shifts / rotates ────────────────────────────────────────
    pub fn asl(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        cpu.set_flag(flags::CARRY, value & 0x80 != 0);
        let result = value << 1;
        op.store(cpu, mem, result);
        set_nz(cpu, result);
    }
    pub fn lsr(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        cpu.set_flag(flags::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        op.store(cpu, mem, result);
        set_nz(cpu, result);
    }
    pub fn rol(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        let carry_in = cpu.flag(flags::CARRY) as u8;
        cpu.set_flag(flags::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        op.store(cpu, mem, result);
        set_nz(cpu, result);
    }
    pub fn ror(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        let carry_in = cpu.flag(flags::CARRY) as u8;
        cpu.set_flag(flags::CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (carry_in << 7);
        op.store(cpu, mem, result);
        set_nz(cpu, result);
    }

    // ── Logical ─────────────────────────────────────────────────
    pub fn and(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.a &= op.load(cpu, mem);
        set_nz(cpu, cpu.a);
    }
    pub fn ora(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.a |= op.load(cpu, mem);
        set_nz(cpu, cpu.a);
    }
    pub fn eor(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        cpu.a ^= op.load(cpu, mem);
        set_nz(cpu, cpu.a);
    }
    pub fn bit(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        cpu.set_flag(flags::NEGATIVE, value & 0x80 != 0);
        cpu.set_flag(flags::OVERFLOW, value & 0x40 != 0);
        cpu.set_flag(flags::ZERO, cpu.a & value == 0);
    }

    // ── Comparisons ─────────────────────────────────────────────
    fn compare(cpu: &mut Cpu, reg: u8, mem: &mut dyn CpuMemory, op: Operand) {
        let value = op.load(cpu, mem);
        let result = reg.wrapping_sub(value);
        cpu.set_flag(flags::CARRY, reg >= value);
        set_nz(cpu, result);
    }
    pub fn cmp(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        compare(cpu, cpu.a, mem, op);
    }
    pub fn cpx(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        compare(cpu, cpu.x, mem, op);
    }
    pub fn cpy(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        compare(cpu, cpu.y, mem, op);
    }

    // ── Branches ────────────────────────────────────────────────
    fn branch_if(cpu: &mut Cpu, condition: bool, op: Operand) {
        if condition {
            if let Operand::Relative(target) = op {
                cpu.pc = target;
            }
        }
    }
    pub fn bcc(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, !cpu.flag(flags::CARRY), op);
    }
    pub fn bcs(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, cpu.flag(flags::CARRY), op);
    }
    pub fn beq(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, cpu.flag(flags::ZERO), op);
    }
    pub fn bne(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, !cpu.flag(flags::ZERO), op);
    }
    pub fn bmi(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, cpu.flag(flags::NEGATIVE), op);
    }
    pub fn bpl(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, !cpu.flag(flags::NEGATIVE), op);
    }
    pub fn bvc(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, !cpu.flag(flags::OVERFLOW), op);
    }
    pub fn bvs(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        branch_if(cpu, cpu.flag(flags::OVERFLOW), op);
    }

    // ── Jumps / subroutines / interrupts ────────────────────────
    pub fn jmp(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, op: Operand) {
        if let Some(addr) = op.address() {
            cpu.pc = addr;
        }
    }
    pub fn jsr(cpu: &mut Cpu, mem: &mut dyn CpuMemory, op: Operand) {
        if let Some(addr) = op.address() {
            let ret = cpu.pc.wrapping_sub(1);
            cpu.push(mem, (ret >> 8) as u8);
            cpu.push(mem, (ret & 0xFF) as u8);
            cpu.pc = addr;
        }
    }
    pub fn rts(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        let lo = cpu.pop(mem) as u16;
        let hi = cpu.pop(mem) as u16;
        cpu.pc = ((hi << 8) | lo).wrapping_add(1);
    }
    pub fn brk(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.enter_interrupt(mem, 0xFFFE, true);
    }
    pub fn rti(cpu: &mut Cpu, mem: &mut dyn CpuMemory, _op: Operand) {
        let status = cpu.pop(mem);
        cpu.p = (status | flags::RESERVED) & !flags::BREAK;
        let lo = cpu.pop(mem) as u16;
        let hi = cpu.pop(mem) as u16;
        cpu.pc = (hi << 8) | lo;
    }

    // ── Flag sets/clears ────────────────────────────────────────
    pub fn clc(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::CARRY, false);
    }
    pub fn sec(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::CARRY, true);
    }
    pub fn cli(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::IRQ_DISABLE, false);
    }
    pub fn sei(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::IRQ_DISABLE, true);
    }
    pub fn cld(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::DECIMAL, false);
    }
    pub fn sed(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::DECIMAL, true);
    }
    pub fn clv(cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {
        cpu.set_flag(flags::OVERFLOW, false);
    }

    // ── Misc ────────────────────────────────────────────────────
    pub fn nop(_cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {}

    /// Halt opcode (0x02, 0x12, ... 0xF2 on NMOS 6502). `step` special-cases
    /// this handler by identity before it would ever run.
    pub fn jam(_cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {}

    /// Any opcode byte with no documented instruction. `step` reports a
    /// fault by identity-comparing against this handler, then runs it as a
    /// harmless one-byte no-op so the slice keeps making progress.
    pub fn undefined(_cpu: &mut Cpu, _mem: &mut dyn CpuMemory, _op: Operand) {}
}

use ops::*;

/// 256-entry decode table, opcode byte -> (handler, addressing mode,
/// nominal cycle count). Laid out in 16x16 so each row is recognizable
/// against a standard 6502 opcode matrix reference. `cycles` is the
/// textbook base count shown in disassembly/debug output; it does not
/// drive the clock (every actual bus access through [`CpuMemory`] already
/// ticks the clock once, so real elapsed cycles fall out of addressing
/// mode + instruction behavior on their own).
pub static TABLE: [Instr; 256] = [
    // 0x00
    i(brk, Brk, 7), i(ora, IndirectX, 6), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(ora, ZeroPage, 3), i(asl, ZeroPage, 5), i(undefined, Implied, 1),
    i(php, Implied, 3), i(ora, Immediate, 2), i(asl, Accumulator, 2), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(ora, Absolute, 4), i(asl, Absolute, 6), i(undefined, Implied, 1),
    // 0x10
    i(bpl, Relative, 2), i(ora, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(ora, ZeroPageX, 4), i(asl, ZeroPageX, 6), i(undefined, Implied, 1),
    i(clc, Implied, 2), i(ora, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(ora, AbsoluteX, 4), i(asl, AbsoluteX, 7), i(undefined, Implied, 1),
    // 0x20
    i(jsr, Absolute, 6), i(and, IndirectX, 6), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(bit, ZeroPage, 3), i(and, ZeroPage, 3), i(rol, ZeroPage, 5), i(undefined, Implied, 1),
    i(plp, Implied, 4), i(and, Immediate, 2), i(rol, Accumulator, 2), i(undefined, Implied, 1),
    i(bit, Absolute, 4), i(and, Absolute, 4), i(rol, Absolute, 6), i(undefined, Implied, 1),
    // 0x30
    i(bmi, Relative, 2), i(and, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(and, ZeroPageX, 4), i(rol, ZeroPageX, 6), i(undefined, Implied, 1),
    i(sec, Implied, 2), i(and, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(and, AbsoluteX, 4), i(rol, AbsoluteX, 7), i(undefined, Implied, 1),
    // 0x40
    i(rti, Implied, 6), i(eor, IndirectX, 6), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(eor, ZeroPage, 3), i(lsr, ZeroPage, 5), i(undefined, Implied, 1),
    i(pha, Implied, 3), i(eor, Immediate, 2), i(lsr, Accumulator, 2), i(undefined, Implied, 1),
    i(jmp, Absolute, 3), i(eor, Absolute, 4), i(lsr, Absolute, 6), i(undefined, Implied, 1),
    // 0x50
    i(bvc, Relative, 2), i(eor, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(eor, ZeroPageX, 4), i(lsr, ZeroPageX, 6), i(undefined, Implied, 1),
    i(cli, Implied, 2), i(eor, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(eor, AbsoluteX, 4), i(lsr, AbsoluteX, 7), i(undefined, Implied, 1),
    // 0x60
    i(rts, Implied, 6), i(adc, IndirectX, 6), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(adc, ZeroPage, 3), i(ror, ZeroPage, 5), i(undefined, Implied, 1),
    i(pla, Implied, 4), i(adc, Immediate, 2), i(ror, Accumulator, 2), i(undefined, Implied, 1),
    i(jmp, Indirect, 5), i(adc, Absolute, 4), i(ror, Absolute, 6), i(undefined, Implied, 1),
    // 0x70
    i(bvs, Relative, 2), i(adc, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(adc, ZeroPageX, 4), i(ror, ZeroPageX, 6), i(undefined, Implied, 1),
    i(sei, Implied, 2), i(adc, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(adc, AbsoluteX, 4), i(ror, AbsoluteX, 7), i(undefined, Implied, 1),
    // 0x80
    i(undefined, Implied, 1), i(sta, IndirectX, 6), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(sty, ZeroPage, 3), i(sta, ZeroPage, 3), i(stx, ZeroPage, 3), i(undefined, Implied, 1),
    i(dey, Implied, 2), i(undefined, Implied, 1), i(txa, Implied, 2), i(undefined, Implied, 1),
    i(sty, Absolute, 4), i(sta, Absolute, 4), i(stx, Absolute, 4), i(undefined, Implied, 1),
    // 0x90
    i(bcc, Relative, 2), i(sta, IndirectY, 6), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(sty, ZeroPageX, 4), i(sta, ZeroPageX, 4), i(stx, ZeroPageY, 4), i(undefined, Implied, 1),
    i(tya, Implied, 2), i(sta, AbsoluteY, 5), i(txs, Implied, 2), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(sta, AbsoluteX, 5), i(undefined, Implied, 1), i(undefined, Implied, 1),
    // 0xA0
    i(ldy, Immediate, 2), i(lda, IndirectX, 6), i(ldx, Immediate, 2), i(undefined, Implied, 1),
    i(ldy, ZeroPage, 3), i(lda, ZeroPage, 3), i(ldx, ZeroPage, 3), i(undefined, Implied, 1),
    i(tay, Implied, 2), i(lda, Immediate, 2), i(tax, Implied, 2), i(undefined, Implied, 1),
    i(ldy, Absolute, 4), i(lda, Absolute, 4), i(ldx, Absolute, 4), i(undefined, Implied, 1),
    // 0xB0
    i(bcs, Relative, 2), i(lda, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(ldy, ZeroPageX, 4), i(lda, ZeroPageX, 4), i(ldx, ZeroPageY, 4), i(undefined, Implied, 1),
    i(clv, Implied, 2), i(lda, AbsoluteY, 4), i(tsx, Implied, 2), i(undefined, Implied, 1),
    i(ldy, AbsoluteX, 4), i(lda, AbsoluteX, 4), i(ldx, AbsoluteY, 4), i(undefined, Implied, 1),
    // 0xC0
    i(cpy, Immediate, 2), i(cmp, IndirectX, 6), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(cpy, ZeroPage, 3), i(cmp, ZeroPage, 3), i(dec, ZeroPage, 5), i(undefined, Implied, 1),
    i(iny, Implied, 2), i(cmp, Immediate, 2), i(dex, Implied, 2), i(undefined, Implied, 1),
    i(cpy, Absolute, 4), i(cmp, Absolute, 4), i(dec, Absolute, 6), i(undefined, Implied, 1),
    // 0xD0
    i(bne, Relative, 2), i(cmp, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(cmp, ZeroPageX, 4), i(dec, ZeroPageX, 6), i(undefined, Implied, 1),
    i(cld, Implied, 2), i(cmp, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(cmp, AbsoluteX, 4), i(dec, AbsoluteX, 7), i(undefined, Implied, 1),
    // 0xE0
    i(cpx, Immediate, 2), i(sbc, IndirectX, 6), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(cpx, ZeroPage, 3), i(sbc, ZeroPage, 3), i(inc, ZeroPage, 5), i(undefined, Implied, 1),
    i(inx, Implied, 2), i(sbc, Immediate, 2), i(nop, Implied, 2), i(undefined, Implied, 1),
    i(cpx, Absolute, 4), i(sbc, Absolute, 4), i(inc, Absolute, 6), i(undefined, Implied, 1),
    // 0xF0
    i(beq, Relative, 2), i(sbc, IndirectY, 5), i(jam, Implied, 0), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(sbc, ZeroPageX, 4), i(inc, ZeroPageX, 6), i(undefined, Implied, 1),
    i(sed, Implied, 2), i(sbc, AbsoluteY, 4), i(undefined, Implied, 1), i(undefined, Implied, 1),
    i(undefined, Implied, 1), i(sbc, AbsoluteX, 4), i(inc, AbsoluteX, 7), i(undefined, Implied, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jam_opcodes_are_exactly_the_documented_twelve() {
        let jam_codes: Vec<u8> = (0u16..256)
            .map(|o| o as u8)
            .filter(|&o| TABLE[o as usize].op == ops::jam)
            .collect();
        assert_eq!(
            jam_codes,
            vec![0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2]
        );
    }

    #[test]
    fn table_has_151_documented_non_jam_non_undefined_opcodes() {
        let documented = (0u16..256)
            .map(|o| o as u8)
            .filter(|&o| {
                let op = TABLE[o as usize].op;
                op != ops::jam && op != ops::undefined
            })
            .count();
        assert_eq!(documented, 151);
    }
}
