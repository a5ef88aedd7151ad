//! Negotiated formatting policy for the encoder.
//!
//! The grammar encoder in [`crate::codec::encode`] decides, per `Literal`, whether it is
//! synchronizing or not from the value itself (see `imap_types::core::Literal::mode`); these
//! types are the policy a caller is expected to have consulted *before* constructing such values,
//! mirroring which literal forms a peer is actually allowed to send given the capabilities it
//! negotiated. They also carry the couple of quoted-string/binary toggles that are genuinely
//! consulted at encode time.

use imap_types::response::Capability;

/// Who is doing the encoding, and with which negotiated options.
///
/// Note: the "is a `FETCH` response mid-attribute-list" flag the spec attaches to a server-mode
/// encode buffer lives on [`crate::codec::encode::EncodeContext`] instead of here, since that's
/// the value actually threaded through each `encode_ctx` call (see
/// [`crate::codec::encode::FetchResponseEncoder`]); `Mode` only models policy a caller consults
/// before constructing AST values, not per-call encoder state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Client(ClientOptions),
    Server(ServerOptions),
}

impl Mode {
    pub fn client(options: ClientOptions) -> Self {
        Self::Client(options)
    }

    pub fn server(options: ServerOptions) -> Self {
        Self::Server(options)
    }
}

/// Client-side formatting policy, negotiated from the server's advertised capabilities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClientOptions {
    pub use_quoted_string: bool,
    pub use_synchronizing_literal: bool,
    pub use_non_synchronizing_literal_plus: bool,
    pub use_non_synchronizing_literal_minus: bool,
    pub use_binary_literal: bool,
}

impl ClientOptions {
    /// Derive client options from a server's advertised `CAPABILITY` list.
    ///
    /// `LITERAL+` is preferred over `LITERAL-` when both are (implausibly) advertised, matching
    /// the precedence the grammar encoder applies when choosing a literal form.
    pub fn from_capabilities(caps: &[Capability<'_>]) -> Self {
        #[cfg(feature = "ext_literal")]
        let contains_literal_plus = caps
            .iter()
            .any(|cap| matches!(cap, Capability::LiteralPlus));
        #[cfg(not(feature = "ext_literal"))]
        let contains_literal_plus = false;

        #[cfg(feature = "ext_literal")]
        let contains_literal_minus = caps
            .iter()
            .any(|cap| matches!(cap, Capability::LiteralMinus));
        #[cfg(not(feature = "ext_literal"))]
        let contains_literal_minus = false;

        #[cfg(feature = "ext_binary")]
        let contains_binary = caps.iter().any(|cap| matches!(cap, Capability::Binary));
        #[cfg(not(feature = "ext_binary"))]
        let contains_binary = false;

        Self {
            use_quoted_string: true,
            use_synchronizing_literal: true,
            use_non_synchronizing_literal_plus: contains_literal_plus,
            use_non_synchronizing_literal_minus: !contains_literal_plus && contains_literal_minus,
            use_binary_literal: contains_binary,
        }
    }
}

/// Server-side formatting policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ServerOptions {
    pub use_quoted_string: bool,
}

impl ServerOptions {
    pub fn from_capabilities(_caps: &[Capability<'_>]) -> Self {
        Self {
            use_quoted_string: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "ext_literal")]
    #[test]
    fn literal_plus_wins_over_literal_minus() {
        let caps = vec![Capability::LiteralPlus, Capability::LiteralMinus];
        let options = ClientOptions::from_capabilities(&caps);

        assert!(options.use_non_synchronizing_literal_plus);
        assert!(!options.use_non_synchronizing_literal_minus);
    }

    #[cfg(feature = "ext_binary")]
    #[test]
    fn binary_capability_enables_binary_literal() {
        let caps = vec![Capability::Binary];
        let options = ClientOptions::from_capabilities(&caps);

        assert!(options.use_binary_literal);
    }

    #[test]
    fn no_capabilities_is_conservative() {
        let options = ClientOptions::from_capabilities(&[]);

        assert!(options.use_quoted_string);
        assert!(options.use_synchronizing_literal);
        assert!(!options.use_non_synchronizing_literal_plus);
        assert!(!options.use_non_synchronizing_literal_minus);
        assert!(!options.use_binary_literal);
    }

    #[test]
    fn server_options_always_allow_quoted_strings() {
        let options = ServerOptions::from_capabilities(&[]);

        assert!(options.use_quoted_string);
    }
}
