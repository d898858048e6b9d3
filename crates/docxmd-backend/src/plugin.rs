//! Registration hook for hosts that load converters as plugins

use crate::docx::DocxConverter;
use crate::traits::ConverterOptions;
use docxmd_core::ConverterRegistry;

/// Version of the plugin interface this crate implements
pub const PLUGIN_INTERFACE_VERSION: u32 = 1;

/// Register the DOCX converter with default options
pub fn register_converters(registry: &mut ConverterRegistry) {
    register_converters_with(registry, ConverterOptions::default());
}

/// Register the DOCX converter with the given options
pub fn register_converters_with(registry: &mut ConverterRegistry, options: ConverterOptions) {
    registry.register_converter(Box::new(DocxConverter::with_options(options)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use docxmd_core::StreamInfo;

    #[test]
    fn test_interface_version() {
        assert_eq!(PLUGIN_INTERFACE_VERSION, 1);
    }

    #[test]
    fn test_register_converters_routes_docx() {
        let mut registry = ConverterRegistry::new();
        register_converters(&mut registry);
        assert_eq!(registry.len(), 1);

        let converter = registry
            .find(&StreamInfo::new().with_extension(".docx"))
            .expect("docx converter should be registered");
        assert_eq!(converter.name(), "docx");
        assert!(registry.find(&StreamInfo::new().with_extension(".txt")).is_none());
    }
}
