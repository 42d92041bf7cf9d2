//! Integration tests for the construction contract.
//!
//! Every scenario is expanded twice, once for `singleton!` and once for
//! `singleton_class!`, so both decorations are held to the same behavior.

macro_rules! construction_contract {
    ($name:ident, $decorate:ident) => {
        mod $name {
            use singleton_registrar::{$decorate, Lifecycle, Singleton};
            use std::convert::Infallible;
            use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU16, AtomicU32, Ordering};
            use std::sync::{Arc, Mutex};

            #[test]
            fn test_basic_singleton() {
                struct MyClass {
                    value: AtomicI32,
                }

                impl Lifecycle for MyClass {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(MyClass {
                            value: AtomicI32::new(-1),
                        })
                    }

                    fn setup(&self, _: ()) -> Result<(), Infallible> {
                        self.value.store(0, Ordering::SeqCst);
                        Ok(())
                    }
                }

                $decorate!(MyClass);

                let instance1 = MyClass::instance(()).unwrap();
                let instance2 = MyClass::instance(()).unwrap();

                assert!(Arc::ptr_eq(&instance1, &instance2));
                assert_eq!(instance1.value.load(Ordering::SeqCst), 0);
                assert_eq!(instance2.value.load(Ordering::SeqCst), 0);
            }

            #[test]
            fn test_setup_reruns_with_latest_arguments() {
                struct DatabaseConnection {
                    host: Mutex<String>,
                    port: AtomicU16,
                }

                impl Lifecycle for DatabaseConnection {
                    type Args = (&'static str, u16);
                    type Error = Infallible;

                    fn allocate(_: &Self::Args) -> Result<Self, Infallible> {
                        Ok(DatabaseConnection {
                            host: Mutex::new("localhost".to_string()),
                            port: AtomicU16::new(5432),
                        })
                    }

                    fn setup(&self, (host, port): Self::Args) -> Result<(), Infallible> {
                        *self.host.lock().unwrap() = host.to_string();
                        self.port.store(port, Ordering::SeqCst);
                        Ok(())
                    }
                }

                $decorate!(DatabaseConnection);

                let db1 = DatabaseConnection::instance(("server1", 5432)).unwrap();
                assert_eq!(*db1.host.lock().unwrap(), "server1");
                assert_eq!(db1.port.load(Ordering::SeqCst), 5432);

                let db2 = DatabaseConnection::instance(("server2", 3306)).unwrap();
                assert!(Arc::ptr_eq(&db1, &db2));
                assert_eq!(*db2.host.lock().unwrap(), "server2");
                assert_eq!(db2.port.load(Ordering::SeqCst), 3306);
                assert_eq!(*db1.host.lock().unwrap(), "server2");
            }

            #[test]
            fn test_setup_with_named_options() {
                struct Config {
                    debug: AtomicBool,
                    timeout: AtomicU32,
                }

                struct ConfigOptions {
                    debug: bool,
                    timeout: u32,
                }

                impl Lifecycle for Config {
                    type Args = ConfigOptions;
                    type Error = Infallible;

                    fn allocate(_: &ConfigOptions) -> Result<Self, Infallible> {
                        Ok(Config {
                            debug: AtomicBool::new(true),
                            timeout: AtomicU32::new(30),
                        })
                    }

                    fn setup(&self, options: ConfigOptions) -> Result<(), Infallible> {
                        self.debug.store(options.debug, Ordering::SeqCst);
                        self.timeout.store(options.timeout, Ordering::SeqCst);
                        Ok(())
                    }
                }

                $decorate!(Config);

                let config1 = Config::instance(ConfigOptions {
                    debug: false,
                    timeout: 60,
                })
                .unwrap();
                let config2 = Config::instance(ConfigOptions {
                    debug: true,
                    timeout: 20,
                })
                .unwrap();

                assert!(Arc::ptr_eq(&config1, &config2));
                assert!(config2.debug.load(Ordering::SeqCst));
                assert_eq!(config2.timeout.load(Ordering::SeqCst), 20);
            }

            #[test]
            fn test_guarded_setup_keeps_first_state() {
                struct Logger {
                    level: Mutex<String>,
                    initialized: AtomicBool,
                    logs: Mutex<Vec<String>>,
                }

                impl Lifecycle for Logger {
                    type Args = &'static str;
                    type Error = Infallible;

                    fn allocate(_: &&'static str) -> Result<Self, Infallible> {
                        Ok(Logger {
                            level: Mutex::new(String::new()),
                            initialized: AtomicBool::new(false),
                            logs: Mutex::new(Vec::new()),
                        })
                    }

                    fn setup(&self, level: &'static str) -> Result<(), Infallible> {
                        if self.initialized.swap(true, Ordering::SeqCst) {
                            return Ok(());
                        }
                        *self.level.lock().unwrap() = level.to_string();
                        Ok(())
                    }
                }

                impl Logger {
                    fn log(&self, message: &str) {
                        let level = self.level.lock().unwrap().clone();
                        self.logs.lock().unwrap().push(format!("[{}] {}", level, message));
                    }
                }

                $decorate!(Logger);

                let logger1 = Logger::instance("DEBUG").unwrap();
                logger1.log("test message 1");
                let logger2 = Logger::instance("ERROR").unwrap();

                assert!(Arc::ptr_eq(&logger1, &logger2));
                assert_eq!(*logger2.level.lock().unwrap(), "DEBUG");
                assert_eq!(
                    *logger2.logs.lock().unwrap(),
                    vec!["[DEBUG] test message 1".to_string()]
                );
            }

            #[test]
            fn test_custom_allocation_stamps_marker() {
                struct CustomAlloc {
                    created_by: &'static str,
                    value: AtomicI32,
                }

                impl Lifecycle for CustomAlloc {
                    type Args = i32;
                    type Error = Infallible;

                    fn allocate(_: &i32) -> Result<Self, Infallible> {
                        Ok(CustomAlloc {
                            created_by: "custom_allocate",
                            value: AtomicI32::new(0),
                        })
                    }

                    fn setup(&self, value: i32) -> Result<(), Infallible> {
                        self.value.store(value, Ordering::SeqCst);
                        Ok(())
                    }
                }

                $decorate!(CustomAlloc);

                let instance1 = CustomAlloc::instance(10).unwrap();
                let instance2 = CustomAlloc::instance(20).unwrap();

                assert!(Arc::ptr_eq(&instance1, &instance2));
                assert_eq!(instance1.created_by, "custom_allocate");
                assert_eq!(instance2.value.load(Ordering::SeqCst), 20);
            }

            #[test]
            fn test_allocation_arguments_only_used_once() {
                struct Person {
                    name: String,
                    age: u32,
                }

                impl Lifecycle for Person {
                    type Args = (&'static str, u32);
                    type Error = Infallible;

                    fn allocate(&(name, age): &Self::Args) -> Result<Self, Infallible> {
                        Ok(Person {
                            name: name.to_string(),
                            age,
                        })
                    }
                }

                impl Person {
                    fn info(&self) -> String {
                        format!("{}:{}", self.name, self.age)
                    }
                }

                $decorate!(Person);

                let obj1 = Person::instance(("Alice", 25)).unwrap();
                let obj2 = Person::instance(("Bob", 30)).unwrap();

                assert!(Arc::ptr_eq(&obj1, &obj2));
                assert_eq!(obj1.info(), "Alice:25");
                assert_eq!(obj2.info(), "Alice:25");
            }

            #[test]
            fn test_state_sharing() {
                struct Counter {
                    count: AtomicU32,
                }

                impl Lifecycle for Counter {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(Counter {
                            count: AtomicU32::new(0),
                        })
                    }
                }

                impl Counter {
                    fn increment(&self) {
                        self.count.fetch_add(1, Ordering::SeqCst);
                    }
                }

                $decorate!(Counter);

                let counter1 = Counter::instance(()).unwrap();
                let counter2 = Counter::instance(()).unwrap();

                counter1.increment();
                assert_eq!(counter2.count.load(Ordering::SeqCst), 1);

                counter2.increment();
                assert_eq!(counter1.count.load(Ordering::SeqCst), 2);
            }

            #[test]
            fn test_distinct_types_get_distinct_instances() {
                struct ClassA {
                    name: &'static str,
                }

                struct ClassB {
                    name: &'static str,
                }

                impl Lifecycle for ClassA {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(ClassA { name: "A" })
                    }
                }

                impl Lifecycle for ClassB {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(ClassB { name: "B" })
                    }
                }

                $decorate!(ClassA);
                $decorate!(ClassB);

                let a1 = ClassA::instance(()).unwrap();
                let a2 = ClassA::instance(()).unwrap();
                let b1 = ClassB::instance(()).unwrap();
                let b2 = ClassB::instance(()).unwrap();

                assert!(Arc::ptr_eq(&a1, &a2));
                assert!(Arc::ptr_eq(&b1, &b2));
                assert_ne!(
                    Arc::as_ptr(&a1) as *const u8,
                    Arc::as_ptr(&b1) as *const u8
                );
                assert_eq!(a1.name, "A");
                assert_eq!(b1.name, "B");
            }

            #[test]
            fn test_wrapper_type_is_isolated_from_inner_type() {
                struct Base {
                    base_value: &'static str,
                }

                struct Derived {
                    base: Base,
                    derived_value: &'static str,
                }

                impl Lifecycle for Base {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(Base { base_value: "base" })
                    }
                }

                impl Lifecycle for Derived {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(args: &()) -> Result<Self, Infallible> {
                        Ok(Derived {
                            base: Base::allocate(args)?,
                            derived_value: "derived",
                        })
                    }
                }

                $decorate!(Base);
                $decorate!(Derived);

                let base1 = Base::instance(()).unwrap();
                let base2 = Base::instance(()).unwrap();
                let derived1 = Derived::instance(()).unwrap();
                let derived2 = Derived::instance(()).unwrap();

                assert!(Arc::ptr_eq(&base1, &base2));
                assert!(Arc::ptr_eq(&derived1, &derived2));
                assert!(!std::ptr::eq(&*base1, &derived1.base));
                assert_eq!(derived1.base.base_value, "base");
                assert_eq!(derived1.derived_value, "derived");
            }

            #[test]
            fn test_peek_and_is_initialized_do_not_construct() {
                struct Lazy {
                    setups: AtomicU32,
                }

                impl Lifecycle for Lazy {
                    type Args = ();
                    type Error = Infallible;

                    fn allocate(_: &()) -> Result<Self, Infallible> {
                        Ok(Lazy {
                            setups: AtomicU32::new(0),
                        })
                    }

                    fn setup(&self, _: ()) -> Result<(), Infallible> {
                        self.setups.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                }

                $decorate!(Lazy);

                assert!(!Lazy::is_initialized());
                assert!(Lazy::peek().is_none());
                assert!(!Lazy::is_initialized());

                let instance = Lazy::instance(()).unwrap();
                let peeked = Lazy::peek().unwrap();

                assert!(Lazy::is_initialized());
                assert!(Arc::ptr_eq(&instance, &peeked));
                assert_eq!(peeked.setups.load(Ordering::SeqCst), 1);
            }
        }
    };
}

construction_contract!(registry_backed, singleton);
construction_contract!(slot_backed, singleton_class);
