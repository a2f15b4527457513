use serde_json::json;
use xvf_types::{ElementType, Values};
use xvf_usb::parameters::ParameterDescriptor;
use xvf_usb::registry::ParameterRegistry;

pub fn format_values(descriptor: &ParameterDescriptor, values: &Values) -> String {
    match (descriptor.element_type, values) {
        (ElementType::Radians, Values::Float(angles)) => {
            let degrees: Vec<String> = angles
                .iter()
                .map(|angle| format!("{:.2}°", angle.to_degrees()))
                .collect();
            format!("{} ({})", values, degrees.join(", "))
        }
        _ => values.to_string(),
    }
}

pub fn format_json(descriptor: &ParameterDescriptor, values: &Values) -> String {
    json!({
        "name": descriptor.name,
        "type": descriptor.element_type.to_string(),
        "values": values,
    })
    .to_string()
}

pub fn format_table(registry: &ParameterRegistry) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<42} {:>5} {:>5} {:>5} {:<8} {}",
        "NAME", "RESID", "CMDID", "COUNT", "TYPE", "ACCESS"
    )];
    for descriptor in registry.iter() {
        lines.push(format!(
            "{:<42} {:>5} {:>5} {:>5} {:<8} {}",
            descriptor.name,
            descriptor.resource_id,
            descriptor.command_id,
            descriptor.count,
            descriptor.element_type.to_string(),
            descriptor.access
        ));
    }
    lines
}
