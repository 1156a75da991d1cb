/// Declares a group of settings as two structs: `XxxCli` to be flattened into a clap
/// parser, and `XxxArgs` with the same fields, a `Default` and builder style setters, for
/// use as a library. Plain fields take a help text and a default, nested groups are
/// listed last without either.
macro_rules! args {
    ($(#$argsmeta:tt)* $name:ident {
        $($fhelp:literal $fname:ident: $ftype:ty = $fdefault:expr;)*
        $($mname:ident: $mtype:ident;)*
    }) => {
        paste::paste! {
            #[derive(clap::Args, Debug)]
            pub struct [<$name Cli>] {
                $(
                    #[arg(long, default_value_t = ($fdefault), help = $fhelp)]
                    $fname: $ftype,
                )*

                $(
                    #[command(flatten)]
                    $mname: [<$mtype Cli>],
                )*
            }

            $(#$argsmeta)*
            pub struct [<$name Args>] {
                $(
                    $fname: $ftype,
                )*

                $(
                    $mname: [<$mtype Args>],
                )*
            }

            impl std::default::Default for [<$name Args>] {
                fn default() -> Self {
                    Self {
                        $(
                            $fname: $fdefault,
                        )*

                        $(
                            $mname: [<$mtype Args>]::default(),
                        )*
                    }
                }
            }

            impl [<$name Args>] {
                $(
                    pub fn $fname(mut self, $fname: $ftype) -> Self {
                        self.$fname = $fname;
                        self
                    }
                )*

                $(
                    pub fn $mname(mut self, $mname: [<$mtype Args>]) -> Self {
                        self.$mname = $mname;
                        self
                    }
                )*
            }

            impl [<$name Cli>] {
                pub fn to_args(&self) -> [<$name Args>] {
                    [<$name Args>] {
                        $(
                            $fname: self.$fname.clone(),
                        )*

                        $(
                            $mname: self.$mname.to_args(),
                        )*
                    }
                }
            }
        }
    };
}

pub(crate) use args;
