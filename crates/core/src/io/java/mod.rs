/// Use of Java's classpath format
pub mod classpath;
/// Finding a Java installation to launch with
pub mod install;
/// Loading of resources through the classpath
pub mod resource;
