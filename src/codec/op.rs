//! Wireless Extensions operation codes.
//!
//! Every request code is paired with the payload kind the kernel expects for
//! it. The same table types the records of a scan event stream, since the
//! kernel reuses request codes as event commands.

use super::payload::PayloadKind;
use std::fmt;

macro_rules! ops {
    ( $( $(#[$meta:meta])* $name:ident = $code:literal, $sym:literal => $kind:ident; )* ) => {
        /// A Wireless Extensions request or event code.
        ///
        /// Decoding is total: codes outside the table become [`Op::Unknown`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Op {
            $( $(#[$meta])* $name, )*
            /// A code this crate does not know about.
            Unknown(u16),
        }

        impl Op {
            /// Every known operation, in code order.
            pub const KNOWN: &'static [Op] = &[ $( Op::$name, )* ];

            /// The numeric code used on the wire.
            pub const fn code(self) -> u16 {
                match self {
                    $( Self::$name => $code, )*
                    Self::Unknown(code) => code,
                }
            }

            /// Decode a numeric code.
            pub const fn from_code(code: u16) -> Self {
                match code {
                    $( $code => Self::$name, )*
                    other => Self::Unknown(other),
                }
            }

            /// The kernel's symbolic name for this code.
            pub const fn symbol(self) -> &'static str {
                match self {
                    $( Self::$name => $sym, )*
                    Self::Unknown(_) => "UNKNOWN",
                }
            }

            /// The payload representation the kernel expects for this code.
            pub const fn payload_kind(self) -> PayloadKind {
                match self {
                    $( Self::$name => PayloadKind::$kind, )*
                    Self::Unknown(_) => PayloadKind::None,
                }
            }
        }
    };
}

ops! {
    Commit = 0x8B00, "SIOCSIWCOMMIT" => None;
    GetName = 0x8B01, "SIOCGIWNAME" => Name;
    SetNwid = 0x8B02, "SIOCSIWNWID" => Param;
    GetNwid = 0x8B03, "SIOCGIWNWID" => Param;
    SetFreq = 0x8B04, "SIOCSIWFREQ" => Freq;
    GetFreq = 0x8B05, "SIOCGIWFREQ" => Freq;
    SetMode = 0x8B06, "SIOCSIWMODE" => Mode;
    GetMode = 0x8B07, "SIOCGIWMODE" => Mode;
    SetSens = 0x8B08, "SIOCSIWSENS" => Param;
    GetSens = 0x8B09, "SIOCGIWSENS" => Param;
    SetRange = 0x8B0A, "SIOCSIWRANGE" => Point;
    GetRange = 0x8B0B, "SIOCGIWRANGE" => Point;
    SetPriv = 0x8B0C, "SIOCSIWPRIV" => Point;
    GetPriv = 0x8B0D, "SIOCGIWPRIV" => Point;
    SetStats = 0x8B0E, "SIOCSIWSTATS" => Point;
    GetStats = 0x8B0F, "SIOCGIWSTATS" => Point;
    SetSpy = 0x8B10, "SIOCSIWSPY" => Point;
    GetSpy = 0x8B11, "SIOCGIWSPY" => Point;
    SetThrSpy = 0x8B12, "SIOCSIWTHRSPY" => Point;
    GetThrSpy = 0x8B13, "SIOCGIWTHRSPY" => Point;
    SetAp = 0x8B14, "SIOCSIWAP" => Addr;
    GetAp = 0x8B15, "SIOCGIWAP" => Addr;
    SetMlme = 0x8B16, "SIOCSIWMLME" => Point;
    GetApList = 0x8B17, "SIOCGIWAPLIST" => Point;
    SetScan = 0x8B18, "SIOCSIWSCAN" => Point;
    GetScan = 0x8B19, "SIOCGIWSCAN" => Point;
    SetEssid = 0x8B1A, "SIOCSIWESSID" => Point;
    GetEssid = 0x8B1B, "SIOCGIWESSID" => Point;
    SetNickname = 0x8B1C, "SIOCSIWNICKN" => Point;
    GetNickname = 0x8B1D, "SIOCGIWNICKN" => Point;
    SetRate = 0x8B20, "SIOCSIWRATE" => Param;
    GetRate = 0x8B21, "SIOCGIWRATE" => Param;
    SetRts = 0x8B22, "SIOCSIWRTS" => Param;
    GetRts = 0x8B23, "SIOCGIWRTS" => Param;
    SetFrag = 0x8B24, "SIOCSIWFRAG" => Param;
    GetFrag = 0x8B25, "SIOCGIWFRAG" => Param;
    SetTxPower = 0x8B26, "SIOCSIWTXPOW" => Param;
    GetTxPower = 0x8B27, "SIOCGIWTXPOW" => Param;
    SetRetry = 0x8B28, "SIOCSIWRETRY" => Param;
    GetRetry = 0x8B29, "SIOCGIWRETRY" => Param;
    SetEncode = 0x8B2A, "SIOCSIWENCODE" => Point;
    GetEncode = 0x8B2B, "SIOCGIWENCODE" => Point;
    SetPower = 0x8B2C, "SIOCSIWPOWER" => Param;
    GetPower = 0x8B2D, "SIOCGIWPOWER" => Param;
    SetGenIe = 0x8B30, "SIOCSIWGENIE" => Point;
    GetGenIe = 0x8B31, "SIOCGIWGENIE" => Point;
    SetAuth = 0x8B32, "SIOCSIWAUTH" => Param;
    GetAuth = 0x8B33, "SIOCGIWAUTH" => Param;
    SetEncodeExt = 0x8B34, "SIOCSIWENCODEEXT" => Point;
    GetEncodeExt = 0x8B35, "SIOCGIWENCODEEXT" => Point;
    SetPmksa = 0x8B36, "SIOCSIWPMKSA" => Point;
    /// Packet dropped to an excessive retry count.
    EvTxDrop = 0x8C00, "IWEVTXDROP" => Addr;
    /// Link quality report, also found in scan results.
    EvQuality = 0x8C01, "IWEVQUAL" => Quality;
    /// Driver-specific text.
    EvCustom = 0x8C02, "IWEVCUSTOM" => Point;
    EvRegistered = 0x8C03, "IWEVREGISTERED" => Addr;
    EvExpired = 0x8C04, "IWEVEXPIRED" => Addr;
    /// Raw information elements (WPA/RSN).
    EvGenIe = 0x8C05, "IWEVGENIE" => Point;
    EvMichaelMicFailure = 0x8C06, "IWEVMICHAELMICFAILURE" => Point;
    EvAssocReqIe = 0x8C07, "IWEVASSOCREQIE" => Point;
    EvAssocRespIe = 0x8C08, "IWEVASSOCRESPIE" => Point;
    EvPmkidCandidate = 0x8C09, "IWEVPMKIDCAND" => Point;
}

impl Op {
    /// Whether the response size is driver-dependent and needs the
    /// growable-buffer protocol.
    pub const fn is_bulk(self) -> bool {
        matches!(
            self,
            Self::GetScan | Self::GetRange | Self::GetEncode | Self::GetEncodeExt | Self::GetApList
        )
    }

    /// Whether this is a "get" request (odd codes in the request range).
    pub const fn is_get(self) -> bool {
        let code = self.code();
        code >= 0x8B00 && code < 0x8C00 && code & 1 == 1
    }

    /// Whether this code is an event rather than a request.
    pub const fn is_event(self) -> bool {
        let code = self.code();
        code >= 0x8C00 && code < 0x8D00
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "UNKNOWN(0x{:04X})", code),
            op => f.write_str(op.symbol()),
        }
    }
}
