/// W3C XML Schema namespace.
pub const XML_SCHEMA: &str = "http://www.w3.org/2001/XMLSchema";

/// W3C XML Schema instance namespace.
pub const XML_SCHEMA_INSTANCE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// W3C WSDL 2.0 namespace.
pub const WSDL: &str = "http://www.w3.org/ns/wsdl";
