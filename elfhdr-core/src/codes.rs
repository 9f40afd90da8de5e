//! Numeric ELF codes mapped to closed enumerations.
//!
//! Every mapping is total. A code with a name becomes that variant, a code in a
//! reserved range becomes the range variant, and anything else becomes
//! `Unknown`. All three keep the raw value, so [`code`](Abi::code) always gives
//! back exactly what was read from the file.

use std::fmt;

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $repr:ty {
            $( $variant:ident = $code:literal => $label:literal, )+
        }
        $( ranges {
            $( $range:ident($lo:literal ..= $hi:literal) => $range_label:literal, )+
        } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $( $( $range($repr), )+ )?
            Unknown($repr),
        }

        impl $name {
            /// Raw code as stored in the file.
            pub fn code(self) -> $repr {
                match self {
                    $( $name::$variant => $code, )+
                    $( $( $name::$range(code) => code, )+ )?
                    $name::Unknown(code) => code,
                }
            }

            /// Descriptive name, `None` for unrecognized codes.
            pub fn label(self) -> Option<&'static str> {
                match self {
                    $( $name::$variant => Some($label), )+
                    $( $( $name::$range(_) => Some($range_label), )+ )?
                    $name::Unknown(_) => None,
                }
            }

            pub fn is_known(self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<$repr> for $name {
            #[allow(unreachable_patterns)]
            fn from(code: $repr) -> Self {
                match code {
                    $( $code => $name::$variant, )+
                    $( $( $lo..=$hi => $name::$range(code), )+ )?
                    _ => $name::Unknown(code),
                }
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $( $name::$variant => f.write_str($label), )+
                    $( $( $name::$range(code) => write!(f, "{}+{:#x}", $range_label, code.wrapping_sub($lo)), )+ )?
                    $name::Unknown(code) => write!(f, "<unknown: {:#x}>", code),
                }
            }
        }
    };
}

code_enum! {
    /// Target operating system ABI (`EI_OSABI`).
    pub enum Abi: u8 {
        SystemV = 0x00 => "UNIX - System V",
        HpUx = 0x01 => "HP-UX",
        NetBsd = 0x02 => "NetBSD",
        Linux = 0x03 => "Linux",
        GnuHurd = 0x04 => "GNU Hurd",
        Solaris = 0x06 => "Solaris",
        Aix = 0x07 => "AIX",
        Irix = 0x08 => "IRIX",
        FreeBsd = 0x09 => "FreeBSD",
        Tru64 = 0x0a => "Tru64",
        NovellModesto = 0x0b => "Novell Modesto",
        OpenBsd = 0x0c => "OpenBSD",
        OpenVms = 0x0d => "OpenVMS",
        NonStopKernel = 0x0e => "NonStop Kernel",
        Aros = 0x0f => "AROS",
        FenixOs = 0x10 => "FenixOS",
        CloudAbi = 0x11 => "CloudABI",
        OpenVos = 0x12 => "Stratus Technologies OpenVOS",
        ArmEabi = 0x40 => "ARM EABI",
        Arm = 0x61 => "ARM",
        Standalone = 0xff => "Standalone App",
    }
}

code_enum! {
    /// Object file type (`e_type`).
    pub enum ObjectType: u16 {
        None = 0x00 => "NONE (No file type)",
        Rel = 0x01 => "REL (Relocatable file)",
        Exec = 0x02 => "EXEC (Executable file)",
        Dyn = 0x03 => "DYN (Shared object file)",
        Core = 0x04 => "CORE (Core file)",
    }
    ranges {
        OsSpecific(0xfe00..=0xfeff) => "LOOS",
        ProcessorSpecific(0xff00..=0xffff) => "LOPROC",
    }
}

code_enum! {
    /// Target instruction set architecture (`e_machine`).
    pub enum Machine: u16 {
        None = 0x00 => "No machine",
        We32100 = 0x01 => "AT&T WE 32100",
        Sparc = 0x02 => "SPARC",
        X86 = 0x03 => "Intel 80386",
        M68k = 0x04 => "Motorola 68000",
        M88k = 0x05 => "Motorola 88000",
        IntelMcu = 0x06 => "Intel MCU",
        I860 = 0x07 => "Intel 80860",
        Mips = 0x08 => "MIPS R3000",
        S370 = 0x09 => "IBM System/370",
        MipsRs3Le = 0x0a => "MIPS R3000 little-endian",
        PaRisc = 0x0e => "HPPA",
        I960 = 0x13 => "Intel 80960",
        PowerPc = 0x14 => "PowerPC",
        PowerPc64 = 0x15 => "PowerPC64",
        S390 = 0x16 => "IBM S/390",
        Spu = 0x17 => "IBM SPU/SPC",
        V800 = 0x24 => "NEC V800",
        Fr20 = 0x25 => "Fujitsu FR20",
        Rh32 = 0x26 => "TRW RH-32",
        Rce = 0x27 => "Motorola RCE",
        Arm = 0x28 => "ARM",
        Alpha = 0x29 => "Digital Alpha",
        SuperH = 0x2a => "Renesas / SuperH SH",
        SparcV9 = 0x2b => "SPARC v9 64-bit",
        TriCore = 0x2c => "Siemens Tricore",
        Arc = 0x2d => "ARC",
        H8_300 = 0x2e => "Renesas H8/300",
        H8_300H = 0x2f => "Renesas H8/300H",
        H8S = 0x30 => "Renesas H8S",
        H8_500 = 0x31 => "Renesas H8/500",
        Ia64 = 0x32 => "Intel IA-64",
        MipsX = 0x33 => "Stanford MIPS-X",
        ColdFire = 0x34 => "Motorola Coldfire",
        M68hc12 = 0x35 => "Motorola M68HC12",
        Mma = 0x36 => "Fujitsu Multimedia Accelerator",
        Pcp = 0x37 => "Siemens PCP",
        Ncpu = 0x38 => "Sony nCPU embedded RISC processor",
        Ndr1 = 0x39 => "Denso NDR1 microprocessor",
        StarCore = 0x3a => "Motorola Star*Core processor",
        Me16 = 0x3b => "Toyota ME16 processor",
        St100 = 0x3c => "STMicroelectronics ST100 processor",
        TinyJ = 0x3d => "Advanced Logic Corp. TinyJ embedded processor",
        X86_64 = 0x3e => "AMD X86-64",
        TiC6000 = 0x8c => "Texas Instruments TMS320C6000 DSP family",
        Elbrus = 0xaf => "MCST Elbrus e2k",
        AArch64 = 0xb7 => "AArch64",
        RiscV = 0xf3 => "RISC-V",
        Bpf = 0xf7 => "Linux BPF",
        Wdc65c816 = 0x101 => "WDC 65816/65C816",
        LoongArch = 0x102 => "LoongArch",
    }
}

code_enum! {
    /// Segment type (`p_type`).
    pub enum SegmentType: u32 {
        Null = 0x0 => "NULL",
        Load = 0x1 => "LOAD",
        Dynamic = 0x2 => "DYNAMIC",
        Interp = 0x3 => "INTERP",
        Note = 0x4 => "NOTE",
        Shlib = 0x5 => "SHLIB",
        Phdr = 0x6 => "PHDR",
        Tls = 0x7 => "TLS",
        GnuEhFrame = 0x6474_e550 => "GNU_EH_FRAME",
        GnuStack = 0x6474_e551 => "GNU_STACK",
        GnuRelro = 0x6474_e552 => "GNU_RELRO",
        GnuProperty = 0x6474_e553 => "GNU_PROPERTY",
    }
    ranges {
        OsSpecific(0x6000_0000..=0x6fff_ffff) => "LOOS",
        ProcessorSpecific(0x7000_0000..=0x7fff_ffff) => "LOPROC",
    }
}

code_enum! {
    /// Section type (`sh_type`).
    pub enum SectionType: u32 {
        Null = 0x0 => "NULL",
        ProgBits = 0x1 => "PROGBITS",
        SymTab = 0x2 => "SYMTAB",
        StrTab = 0x3 => "STRTAB",
        Rela = 0x4 => "RELA",
        Hash = 0x5 => "HASH",
        Dynamic = 0x6 => "DYNAMIC",
        Note = 0x7 => "NOTE",
        NoBits = 0x8 => "NOBITS",
        Rel = 0x9 => "REL",
        Shlib = 0xa => "SHLIB",
        DynSym = 0xb => "DYNSYM",
        InitArray = 0xe => "INIT_ARRAY",
        FiniArray = 0xf => "FINI_ARRAY",
        PreinitArray = 0x10 => "PREINIT_ARRAY",
        Group = 0x11 => "GROUP",
        SymTabShndx = 0x12 => "SYMTAB_SHNDX",
        Relr = 0x13 => "RELR",
        GnuAttributes = 0x6fff_fff5 => "GNU_ATTRIBUTES",
        GnuHash = 0x6fff_fff6 => "GNU_HASH",
        GnuLiblist = 0x6fff_fff7 => "GNU_LIBLIST",
        GnuVerdef = 0x6fff_fffd => "VERDEF",
        GnuVerneed = 0x6fff_fffe => "VERNEED",
        GnuVersym = 0x6fff_ffff => "VERSYM",
    }
    ranges {
        OsSpecific(0x6000_0000..=0x6fff_ffff) => "LOOS",
        ProcessorSpecific(0x7000_0000..=0x7fff_ffff) => "LOPROC",
        UserSpecific(0x8000_0000..=0xffff_ffff) => "LOUSER",
    }
}

impl ObjectType {
    pub fn is_executable(self) -> bool {
        self == ObjectType::Exec
    }
}
