use crate::commands::Command;
use crate::error::{CommandError, RegistryError};
use crate::parameters::{ParameterDescriptor, PARAMETERS, TABLE_VERSION};
use lazy_static::lazy_static;
use log::debug;
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref REGISTRY: ParameterRegistry = match ParameterRegistry::new(PARAMETERS) {
        Ok(registry) => registry,
        Err(error) => panic!("Parameter table v{} is invalid: {}", TABLE_VERSION, error),
    };
}

/// The process wide registry, built from [`PARAMETERS`] on first use.
pub fn registry() -> &'static ParameterRegistry {
    &REGISTRY
}

/// Name to descriptor lookup. Immutable once built, so it can be shared between threads freely.
#[derive(Debug)]
pub struct ParameterRegistry {
    // Keyed by the upper-cased name, lookups are case-insensitive.
    parameters: BTreeMap<String, ParameterDescriptor>,
}

impl ParameterRegistry {
    pub fn new(table: &[ParameterDescriptor]) -> Result<Self, RegistryError> {
        let mut parameters = BTreeMap::new();
        let mut addresses: HashMap<Command, &ParameterDescriptor> = HashMap::new();

        for descriptor in table {
            descriptor.validate()?;

            // Two names may alias one command, as long as they agree on what lives there.
            if let Some(existing) = addresses.get(&descriptor.command()) {
                if existing.count != descriptor.count
                    || existing.element_type != descriptor.element_type
                {
                    return Err(RegistryError::ConflictingAddress {
                        first: existing.name,
                        second: descriptor.name,
                        resource_id: descriptor.resource_id,
                        command_id: descriptor.command_id,
                    });
                }
            } else {
                addresses.insert(descriptor.command(), descriptor);
            }

            let key = descriptor.name.to_ascii_uppercase();
            if parameters.insert(key.clone(), *descriptor).is_some() {
                return Err(RegistryError::DuplicateName(key));
            }
        }

        debug!(
            "Loaded parameter table v{} with {} entries",
            TABLE_VERSION,
            parameters.len()
        );
        Ok(Self { parameters })
    }

    pub fn resolve(&self, name: &str) -> Result<&ParameterDescriptor, CommandError> {
        self.parameters
            .get(&name.to_ascii_uppercase())
            .ok_or_else(|| CommandError::UnknownParameter(name.to_string()))
    }

    pub fn version(&self) -> u32 {
        TABLE_VERSION
    }

    /// All descriptors, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.values()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
