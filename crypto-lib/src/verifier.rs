/*++

Licensed under the Apache-2.0 license.

File Name:

    verifier.rs

Abstract:

    File contains the ECDSA verification backends: the public key
    accelerator, and the boot ROM verification service reached through a
    temporary mapping of the ROM.

    Whatever the backend reports, a failed verification is returned as
    CRYPTO_ERR_SIGNATURE. Details are only logged at verbose level.

--*/

use crate::asn1::{EcdsaSignature, NamedCurve, CRYPTO_PUBKEY_MAX_SIZE, ECDSA_COMPONENT_SIZE};
use crate::config::PlatformConfig;
use crate::guard::EngineGuard;
use bootcrypt_drivers::{
    cverbose, cwarn, BootRomVerifyService, MemAttr, Pka, PkaEcdsaCurve, RegionMapper, Rng,
    Sha256Digest, BOOT_API_RETURN_OK,
};
use bootcrypt_error::{BootCryptError, BootCryptResult};

/// Raw public key, X then Y
pub type EcdsaPubKey = [u8; CRYPTO_PUBKEY_MAX_SIZE];

/// ECDSA verification backend
pub trait EcdsaVerifier {
    /// Hashed public keys carry the curve identifier in front of the key
    const HASHED_PK_HAS_CURVE_ID: bool;

    /// Bring up the hardware behind the backend
    fn init(&mut self) -> BootCryptResult<()>;

    /// Return the hardware behind the backend to idle
    fn zeroize(&mut self);

    /// Verify a signature
    ///
    /// # Arguments
    ///
    /// * `hash`   - SHA-256 digest of the signed data
    /// * `pubkey` - Public key
    /// * `sig`    - Signature
    /// * `curve`  - Curve of the public key
    ///
    /// # Returns
    ///
    /// * `CRYPTO_ERR_SIGNATURE` on any failure
    fn verify(
        &mut self,
        hash: &Sha256Digest,
        pubkey: &EcdsaPubKey,
        sig: &EcdsaSignature,
        curve: NamedCurve,
    ) -> BootCryptResult<()>;
}

/// Verification on the public key accelerator
pub struct PkaVerifier<P: Pka, R: Rng> {
    pka: P,
    rng: R,
}

impl<P: Pka, R: Rng> PkaVerifier<P, R> {
    /// Create a new instance of `PkaVerifier`
    ///
    /// # Arguments
    ///
    /// * `pka` - Public key accelerator
    /// * `rng` - Random number generator used by the accelerator
    pub fn new(pka: P, rng: R) -> Self {
        Self { pka, rng }
    }

    pub fn pka(&self) -> &P {
        &self.pka
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

bitflags::bitflags! {
    /// Curves the accelerator backend is built with
    pub struct PkaCurves : u32 {
        const NIST_P256 = 0x1;
        const BRAINPOOL_P256T1 = 0x2;
    }
}

impl PkaCurves {
    /// Curves enabled by the `nist-p256` and `brainpool-p256t1` features
    pub fn compiled() -> Self {
        let mut curves = Self::empty();
        if cfg!(feature = "nist-p256") {
            curves |= Self::NIST_P256;
        }
        if cfg!(feature = "brainpool-p256t1") {
            curves |= Self::BRAINPOOL_P256T1;
        }
        curves
    }
}

/// Accelerator curve for the key curve, if it is part of `curves`
fn pka_curve(curve: NamedCurve, curves: PkaCurves) -> Option<PkaEcdsaCurve> {
    match curve {
        NamedCurve::NistP256 if curves.contains(PkaCurves::NIST_P256) => {
            Some(PkaEcdsaCurve::NistP256)
        }
        NamedCurve::NistP256 => {
            cwarn!("nist_p256 requested but not included");
            None
        }
        NamedCurve::Brainpool256 if curves.contains(PkaCurves::BRAINPOOL_P256T1) => {
            Some(PkaEcdsaCurve::BrainpoolP256t1)
        }
        NamedCurve::Brainpool256 => {
            cwarn!("brainpool_p256t1 requested but not included");
            None
        }
    }
}

impl<P: Pka, R: Rng> EcdsaVerifier for PkaVerifier<P, R> {
    const HASHED_PK_HAS_CURVE_ID: bool = true;

    fn init(&mut self) -> BootCryptResult<()> {
        self.rng
            .init()
            .map_err(|_| BootCryptError::FATAL_RNG_INIT)?;
        self.pka
            .init()
            .map_err(|_| BootCryptError::FATAL_PKA_INIT)
    }

    fn zeroize(&mut self) {
        self.pka.zeroize();
    }

    fn verify(
        &mut self,
        hash: &Sha256Digest,
        pubkey: &EcdsaPubKey,
        sig: &EcdsaSignature,
        curve: NamedCurve,
    ) -> BootCryptResult<()> {
        let selected =
            pka_curve(curve, PkaCurves::compiled()).ok_or(BootCryptError::CRYPTO_ERR_SIGNATURE)?;
        let (x, y) = pubkey.split_at(ECDSA_COMPONENT_SIZE);

        let mut pka = EngineGuard::new(&mut self.pka);
        pka.ecdsa_verify(hash, &sig.r, &sig.s, x, y, selected)
            .map_err(|err| {
                cverbose!("pka ecdsa_verify {}", u32::from(err));
                BootCryptError::CRYPTO_ERR_SIGNATURE
            })
    }
}

/// Mapping of the boot ROM, removed when dropped
struct RomWindow<'a, M: RegionMapper> {
    mapper: &'a mut M,
    base_va: usize,
    size: usize,
}

impl<'a, M: RegionMapper> RomWindow<'a, M> {
    fn map(mapper: &'a mut M, config: &PlatformConfig) -> BootCryptResult<Self> {
        let base_va = config.rom_base as usize;
        mapper.add_dynamic_region(
            config.rom_base,
            base_va,
            config.rom_size,
            MemAttr::CODE | MemAttr::SECURE,
        )?;
        Ok(Self {
            mapper,
            base_va,
            size: config.rom_size,
        })
    }
}

impl<M: RegionMapper> Drop for RomWindow<'_, M> {
    fn drop(&mut self) {
        if let Err(err) = self.mapper.remove_dynamic_region(self.base_va, self.size) {
            cwarn!("rom unmap {}", u32::from(err));
        }
    }
}

/// Verification by the boot ROM service
pub struct BootRomVerifier<S: BootRomVerifyService, M: RegionMapper> {
    rom: S,
    mapper: M,
    config: PlatformConfig,
}

impl<S: BootRomVerifyService, M: RegionMapper> BootRomVerifier<S, M> {
    /// Create a new instance of `BootRomVerifier`
    ///
    /// # Arguments
    ///
    /// * `rom`    - Verification service published by the boot ROM
    /// * `mapper` - Translation table manager
    /// * `config` - Platform configuration giving the ROM window
    pub fn new(rom: S, mapper: M, config: PlatformConfig) -> Self {
        Self {
            rom,
            mapper,
            config,
        }
    }

    pub fn rom(&self) -> &S {
        &self.rom
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut M {
        &mut self.mapper
    }
}

impl<S: BootRomVerifyService, M: RegionMapper> EcdsaVerifier for BootRomVerifier<S, M> {
    const HASHED_PK_HAS_CURVE_ID: bool = false;

    fn init(&mut self) -> BootCryptResult<()> {
        Ok(())
    }

    /// The ROM service holds no state between calls
    fn zeroize(&mut self) {}

    fn verify(
        &mut self,
        hash: &Sha256Digest,
        pubkey: &EcdsaPubKey,
        sig: &EcdsaSignature,
        curve: NamedCurve,
    ) -> BootCryptResult<()> {
        let _window = RomWindow::map(&mut self.mapper, &self.config).map_err(|err| {
            cverbose!("mmap_add_dynamic_region {}", u32::from(err));
            BootCryptError::CRYPTO_ERR_SIGNATURE
        })?;

        let ret = self
            .rom
            .ecdsa_verify_signature(hash, pubkey, &sig.to_bytes(), curve.id());
        if ret != BOOT_API_RETURN_OK {
            cverbose!("boot rom verify_signature {}", ret);
            return Err(BootCryptError::CRYPTO_ERR_SIGNATURE);
        }

        Ok(())
    }
}
