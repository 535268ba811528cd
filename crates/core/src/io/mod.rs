/// Interaction with Java: classpaths, classpath resources, and installations
pub mod java;
/// Reading of Java properties files
pub mod properties;
