use tandem_primitives::Address;

/// Observable changes to the gate's configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GateEvent {
    /// The registry was replaced.
    RegistrySet { old: Address, new: Address },

    /// The strictness level passed to the registry changed.
    RegistryLevelUpdated { old: u32, new: u32 },

    /// The global restriction switch was set.
    RestrictStatusUpdated { old: bool, new: bool },

    /// An operator was added to the local override list.
    LocalAllowListAdded { operator: Address },

    /// An operator was removed from the local override list.
    LocalAllowListRemoved { operator: Address },
}
