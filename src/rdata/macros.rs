//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

/// Defines the record data enum and the codec table.
///
/// Each type listed needs an associated `RTYPE` constant and implementations
/// of `ParseRecordData`, `ComposeRecordData`, and `Display`. Adding a type
/// to the invocation adds a variant to [`AllRecordData`] and an entry to
/// [`CODECS`].
macro_rules! rdata_types {
    ( $(
        $module:ident::{ $( $rtype:ident, )* }
    )* ) => {
        $(
            pub use self::$module::{ $( $rtype, )* };
        )*

        //------------ AllRecordData -----------------------------------------

        /// Record data for all record types.
        ///
        /// This enum collects the record data types for all currently
        /// implemented record types. Data for any other type is kept in
        /// its raw form in the `Unknown` variant.
        ///
        /// The record type is always derived from the variant, so a value
        /// can’t claim to be of a type different from its content.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[non_exhaustive]
        pub enum AllRecordData {
            $( $(
                $rtype($rtype),
            )* )*
            Unknown(UnknownRecordData),
        }

        //--- From

        $( $(
            impl From<$rtype> for AllRecordData {
                fn from(value: $rtype) -> Self {
                    AllRecordData::$rtype(value)
                }
            }
        )* )*

        impl From<UnknownRecordData> for AllRecordData {
            fn from(value: UnknownRecordData) -> Self {
                AllRecordData::Unknown(value)
            }
        }

        //--- RecordData and ComposeRecordData

        impl RecordData for AllRecordData {
            fn rtype(&self) -> Rtype {
                match *self {
                    $( $(
                        AllRecordData::$rtype(_) => $rtype::RTYPE,
                    )* )*
                    AllRecordData::Unknown(ref inner) => inner.rtype(),
                }
            }
        }

        impl ComposeRecordData for AllRecordData {
            fn rdlen(&self) -> Option<u16> {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => inner.rdlen(),
                    )* )*
                    AllRecordData::Unknown(ref inner) => inner.rdlen(),
                }
            }

            fn compose_rdata<Target: Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            inner.compose_rdata(target)
                        }
                    )* )*
                    AllRecordData::Unknown(ref inner) => {
                        inner.compose_rdata(target)
                    }
                }
            }
        }

        //--- Display

        impl fmt::Display for AllRecordData {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            fmt::Display::fmt(inner, f)
                        }
                    )* )*
                    AllRecordData::Unknown(ref inner) => {
                        fmt::Display::fmt(inner, f)
                    }
                }
            }
        }

        //------------ CODECS ------------------------------------------------

        /// The codecs for all record types with a specific implementation.
        ///
        /// Record types not present here are treated as unknown record data.
        pub static CODECS: &[RecordCodec] = &[
            $( $(
                RecordCodec {
                    rtype: $rtype::RTYPE,
                    parse: |rtype, parser| {
                        $rtype::parse_rdata(rtype, parser)
                            .map(|data| data.map(AllRecordData::$rtype))
                    },
                },
            )* )*
        ];
    }
}

/// Defines a record data type consisting of a single domain name.
macro_rules! name_type {
    (
        $(#[$attr:meta])*
        ( $target:ident, $rtype:ident, $field:ident, $into_field:ident )
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub struct $target {
            $field: Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub(crate) const RTYPE: Rtype = Rtype::$rtype;

            pub fn new($field: Name) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &Name {
                &self.$field
            }

            pub fn $into_field(self) -> Name {
                self.$field
            }

            pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
                parser: &mut Parser<'_, Octs>,
            ) -> Result<Self, ParseError> {
                Name::parse(parser).map(Self::new)
            }
        }

        //--- From and FromStr

        impl From<Name> for $target {
            fn from(name: Name) -> Self {
                Self::new(name)
            }
        }

        impl FromStr for $target {
            type Err = NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Name::from_str(s).map(Self::new)
            }
        }

        //--- RecordData, ParseRecordData, ComposeRecordData

        impl RecordData for $target {
            fn rtype(&self) -> Rtype {
                $target::RTYPE
            }
        }

        impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
            for $target
        {
            fn parse_rdata(
                rtype: Rtype,
                parser: &mut Parser<'a, Octs>,
            ) -> Result<Option<Self>, ParseError> {
                if rtype == $target::RTYPE {
                    Self::parse(parser).map(Some)
                } else {
                    Ok(None)
                }
            }
        }

        impl ComposeRecordData for $target {
            fn rdlen(&self) -> Option<u16> {
                // Names are at most 255 octets long.
                Some(self.$field.len() as u16)
            }

            fn compose_rdata<Target: Composer + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                self.$field.compose(target)
            }
        }

        //--- Display

        impl fmt::Display for $target {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:#}", self.$field)
            }
        }

        //--- Deref

        impl ops::Deref for $target {
            type Target = Name;

            fn deref(&self) -> &Self::Target {
                &self.$field
            }
        }
    }
}
