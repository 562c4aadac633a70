//! Built-in schema.org vocabulary.
//!
//! Declares the catalog entity types (`Thing`, `ActionAccessSpecification`,
//! `LoanOrCredit`, `LegislationObject`, `Physiotherapy`), every type their
//! properties reference, and the enumerations they use. Shared property
//! groups (`Thing`, `Service`, `CreativeWork`, ...) are declared once as
//! property sets and spliced into each type that inherits them.
//!
//! The registry is built on first access and shared for the life of the
//! process.

use lazy_static::lazy_static;

use crate::error::SchemaError;
use crate::schema::{Registry, RegistryBuilder};

lazy_static! {
    static ref VOCABULARY: Registry = builder()
        .build()
        .expect("built-in vocabulary is well-formed");
}

/// Returns the process-wide built-in registry.
pub fn vocabulary() -> &'static Registry {
    &VOCABULARY
}

/// Builds a fresh copy of the built-in registry.
pub fn build() -> Result<Registry, SchemaError> {
    builder().build()
}

/// Returns the built-in declarations, for extension before building.
///
/// ```rust
/// use schemaorg_or::model::DataType;
/// use schemaorg_or::vocab;
///
/// let registry = vocab::builder()
///     .declare_property("LoanOrCredit", "loanReference", [DataType::Text])
///     .build()
///     .unwrap();
/// assert!(registry.lookup("LoanOrCredit").unwrap().property("loanReference").is_some());
/// ```
pub fn builder() -> RegistryBuilder {
    let b = RegistryBuilder::new();
    let b = enumerations(b);
    let b = property_sets(b);
    let b = catalog_types(b);
    referenced_types(b)
}

fn enumerations(b: RegistryBuilder) -> RegistryBuilder {
    b.enumeration(
        "LegalValueLevel",
        [
            "AuthoritativeLegalValue",
            "DefinitiveLegalValue",
            "OfficialLegalValue",
            "UnofficialLegalValue",
        ],
    )
    .enumeration(
        "LegalForceStatus",
        ["InForce", "NotInForce", "PartiallyInForce"],
    )
    .enumeration(
        "PhysicalActivityCategory",
        [
            "AerobicActivity",
            "AnaerobicActivity",
            "Balance",
            "Flexibility",
            "LeisureTimeActivity",
            "OccupationalActivity",
            "StrengthTraining",
        ],
    )
}

fn property_sets(b: RegistryBuilder) -> RegistryBuilder {
    b.property_set("Thing", |s| {
        s.property("additionalType", ["URL"])
            .property("alternateName", ["Text"])
            .property("description", ["Text"])
            .property("disambiguatingDescription", ["Text"])
            .property("identifier", ["PropertyValue", "Text", "URL"])
            .property("image", ["ImageObject", "URL"])
            .property("mainEntityOfPage", ["CreativeWork", "URL"])
            .property("name", ["Text"])
            .property("potentialAction", ["Action"])
            .property("sameAs", ["URL"])
            .property("subjectOf", ["CreativeWork", "Event"])
            .property("url", ["URL"])
    })
    .property_set("Service", |s| {
        s.property("aggregateRating", ["AggregateRating"])
            .property("areaServed", ["AdministrativeArea", "GeoShape", "Place", "Text"])
            .property("audience", ["Audience"])
            .property("availableChannel", ["ServiceChannel"])
            .property("award", ["Text"])
            .property("brand", ["Brand", "Organization"])
            .property("broker", ["Organization", "Person"])
            .property("category", ["PhysicalActivityCategory", "Text", "Thing"])
            .property("hasOfferCatalog", ["OfferCatalog"])
            .property("hoursAvailable", ["OpeningHoursSpecification"])
            .property("isRelatedTo", ["Product", "Service"])
            .property("isSimilarTo", ["Product", "Service"])
            .property("logo", ["ImageObject", "URL"])
            .property("offers", ["Offer"])
            .property("provider", ["Organization", "Person"])
            .property("providerMobility", ["Text"])
            .property("review", ["Review"])
            .property("serviceOutput", ["Thing"])
            .property("serviceType", ["Text"])
            .property("termsOfService", ["Text", "URL"])
    })
    .property_set("FinancialProduct", |s| {
        s.property("annualPercentageRate", ["Number", "QuantitativeValue"])
            .property("feesAndCommissionsSpecification", ["Text", "URL"])
            .property("interestRate", ["Number", "QuantitativeValue"])
    })
    .property_set("MediaObject", |s| {
        s.property("associatedArticle", ["NewsArticle"])
            .property("bitrate", ["Text"])
            .property("contentSize", ["Text"])
            .property("contentUrl", ["URL"])
            .property("duration", ["Duration"])
            .property("embedUrl", ["URL"])
            .property("encodesCreativeWork", ["CreativeWork"])
            .property("encodingFormat", ["Text", "URL"])
            .property("height", ["Distance", "QuantitativeValue"])
            .property("playerType", ["Text"])
            .property("productionCompany", ["Organization"])
            .property("regionsAllowed", ["Place"])
            .property("requiresSubscription", ["Boolean", "MediaSubscription"])
            .property("uploadDate", ["Date"])
            .property("width", ["Distance", "QuantitativeValue"])
    })
    .property_set("CreativeWork", |s| {
        s.property("about", ["Thing"])
            .property("accessMode", ["Text"])
            .property("accessModeSufficient", ["Text"])
            .property("accessibilityAPI", ["Text"])
            .property("accessibilityControl", ["Text"])
            .property("accessibilityFeature", ["Text"])
            .property("accessibilityHazard", ["Text"])
            .property("accessibilitySummary", ["Text"])
            .property("accountablePerson", ["Person"])
            .property("aggregateRating", ["AggregateRating"])
            .property("alternativeHeadline", ["Text"])
            .property("associatedMedia", ["MediaObject"])
            .property("audience", ["Audience"])
            .property("audio", ["AudioObject"])
            .property("author", ["Organization", "Person"])
            .property("award", ["Text"])
            .property("character", ["Person"])
            .property("citation", ["CreativeWork", "Text"])
            .property("comment", ["Comment"])
            .property("commentCount", ["Integer"])
            .property("contentLocation", ["Place"])
            .property("contentRating", ["Rating", "Text"])
            .property("contentReferenceTime", ["DateTime"])
            .property("contributor", ["Organization", "Person"])
            .property("copyrightHolder", ["Organization", "Person"])
            .property("copyrightYear", ["Number"])
            .property("correction", ["CorrectionComment", "Text", "URL"])
            .property("creator", ["Organization", "Person"])
            .property("dateCreated", ["Date", "DateTime"])
            .property("dateModified", ["Date", "DateTime"])
            .property("datePublished", ["Date"])
            .property("discussionUrl", ["URL"])
            .property("editor", ["Person"])
            .property("educationalAlignment", ["AlignmentObject"])
            .property("educationalUse", ["Text"])
            .property("encoding", ["MediaObject"])
            .property("exampleOfWork", ["CreativeWork"])
            .property("expires", ["Date"])
            .property("funder", ["Organization", "Person"])
            .property("genre", ["Text", "URL"])
            .property("hasPart", ["CreativeWork", "Trip"])
            .property("headline", ["Text"])
            .property("inLanguage", ["Language", "Text"])
            .property("interactionStatistic", ["InteractionCounter"])
            .property("interactivityType", ["Text"])
            .property("isAccessibleForFree", ["Boolean"])
            .property("isBasedOn", ["CreativeWork", "Product", "URL"])
            .property("isFamilyFriendly", ["Boolean"])
            .property("isPartOf", ["CreativeWork", "Trip"])
            .property("keywords", ["Text"])
            .property("learningResourceType", ["Text"])
            .property("license", ["CreativeWork", "URL"])
            .property("locationCreated", ["Place"])
            .property("mainEntity", ["Thing"])
            .property("material", ["Product", "Text", "URL"])
            .property("mentions", ["Thing"])
            .property("offers", ["Offer"])
            .property("position", ["Integer", "Text"])
            .property("producer", ["Organization", "Person"])
            .property("provider", ["Organization", "Person"])
            .property("publication", ["PublicationEvent"])
            .property("publisher", ["Organization", "Person"])
            .property("publisherImprint", ["Organization"])
            .property("publishingPrinciples", ["CreativeWork", "URL"])
            .property("recordedAt", ["Event"])
            .property("releasedEvent", ["PublicationEvent"])
            .property("review", ["Review"])
            .property("schemaVersion", ["Text", "URL"])
            .property("sdDatePublished", ["Date"])
            .property("sdLicense", ["CreativeWork", "URL"])
            .property("sdPublisher", ["Organization", "Person"])
            .property("sourceOrganization", ["Organization"])
            .property("spatialCoverage", ["Place"])
            .property("sponsor", ["Organization", "Person"])
            .property("temporalCoverage", ["DateTime", "Text", "URL"])
            .property("text", ["Text"])
            .property("thumbnailUrl", ["URL"])
            .property("timeRequired", ["Duration"])
            .property("translationOfWork", ["CreativeWork"])
            .property("translator", ["Organization", "Person"])
            .property("typicalAgeRange", ["Text"])
            .property("version", ["Number", "Text"])
            .property("video", ["VideoObject"])
            .property("workExample", ["CreativeWork"])
            .property("workTranslation", ["CreativeWork"])
    })
    .property_set("Legislation", |s| {
        s.property("legislationApplies", ["Legislation"])
            .property("legislationChanges", ["Legislation"])
            .property("legislationConsolidates", ["Legislation"])
            .property("legislationDate", ["Date"])
            .property("legislationDateVersion", ["Date"])
            .property("legislationIdentifier", ["Text", "URL"])
            .property("legislationJurisdiction", ["AdministrativeArea", "Text"])
            .property("legislationLegalForce", ["LegalForceStatus"])
            .property("legislationPassedBy", ["Organization", "Person"])
            .property("legislationResponsible", ["Organization", "Person"])
            .property("legislationTransposes", ["Legislation"])
            .property("legislationType", ["CategoryCode", "Text"])
    })
    .property_set("Place", |s| {
        s.property("address", ["Text"])
            .property("containedInPlace", ["Place"])
            .property("geo", ["GeoShape"])
            .property("telephone", ["Text"])
    })
    .property_set("Rating", |s| {
        s.property("author", ["Organization", "Person"])
            .property("bestRating", ["Number", "Text"])
            .property("ratingValue", ["Number", "Text"])
            .property("worstRating", ["Number", "Text"])
    })
    .property_set("Event", |s| {
        s.property("duration", ["Duration"])
            .property("endDate", ["Date", "DateTime"])
            .property("location", ["Place", "Text"])
            .property("organizer", ["Organization", "Person"])
            .property("startDate", ["Date", "DateTime"])
    })
    .property_set("Comment", |s| {
        s.property("downvoteCount", ["Integer"])
            .property("parentItem", ["Comment"])
            .property("upvoteCount", ["Integer"])
    })
}

/// The catalog types, with properties in schema.org inheritance order:
/// own properties first, `Thing` last.
fn catalog_types(b: RegistryBuilder) -> RegistryBuilder {
    b.entity_type("Thing", |t| t.include("Thing"))
        .entity_type("ActionAccessSpecification", |t| {
            t.subtype_of("Intangible")
                .property("availabilityEnds", ["DateTime"])
                .property("availabilityStarts", ["DateTime"])
                .property("category", ["PhysicalActivityCategory", "Text", "Thing"])
                .property("eligibleRegion", ["GeoShape", "Place", "Text"])
                .property("expectsAcceptanceOf", ["Offer"])
                .property("requiresSubscription", ["Boolean", "MediaSubscription"])
                .include("Thing")
        })
        .entity_type("LoanOrCredit", |t| {
            t.subtype_of("FinancialProduct")
                .property("amount", ["MonetaryAmount", "Number"])
                .property("currency", ["Text"])
                .property("gracePeriod", ["Duration"])
                .property("loanRepaymentForm", ["RepaymentSpecification"])
                .property("loanTerm", ["QuantitativeValue"])
                .property("loanType", ["Text", "URL"])
                .property("recourseLoan", ["Boolean"])
                .property("renegotiableLoan", ["Boolean"])
                .property("requiredCollateral", ["Text", "Thing"])
                .include("FinancialProduct")
                .include("Service")
                .include("Thing")
        })
        .entity_type("LegislationObject", |t| {
            t.subtype_of("Legislation")
                .subtype_of("MediaObject")
                .property("legislationLegalValue", ["LegalValueLevel"])
                .include("MediaObject")
                .include("CreativeWork")
                .include("Legislation")
                .include("Thing")
        })
        // Declared without properties; documents may carry only @type and @id.
        .entity_type("Physiotherapy", |t| t.subtype_of("Thing"))
}

/// Types referenced from catalog properties.
fn referenced_types(b: RegistryBuilder) -> RegistryBuilder {
    b.entity_type("Intangible", |t| t.subtype_of("Thing").include("Thing"))
        .entity_type("StructuredValue", |t| t.subtype_of("Intangible").include("Thing"))
        .entity_type("Service", |t| {
            t.subtype_of("Intangible").include("Service").include("Thing")
        })
        .entity_type("FinancialProduct", |t| {
            t.subtype_of("Service")
                .include("FinancialProduct")
                .include("Service")
                .include("Thing")
        })
        .entity_type("MonetaryAmount", |t| {
            t.subtype_of("StructuredValue")
                .property("currency", ["Text"])
                .property("maxValue", ["Number"])
                .property("minValue", ["Number"])
                .property("validFrom", ["Date", "DateTime"])
                .property("validThrough", ["Date", "DateTime"])
                .property("value", ["Boolean", "Number", "Text"])
                .include("Thing")
        })
        .entity_type("QuantitativeValue", |t| {
            t.subtype_of("StructuredValue")
                .property("maxValue", ["Number"])
                .property("minValue", ["Number"])
                .property("unitCode", ["Text", "URL"])
                .property("unitText", ["Text"])
                .property("value", ["Boolean", "Number", "Text"])
                .include("Thing")
        })
        .entity_type("RepaymentSpecification", |t| {
            t.subtype_of("StructuredValue")
                .property("downPayment", ["MonetaryAmount", "Number"])
                .property("earlyPrepaymentPenalty", ["MonetaryAmount"])
                .property("loanPaymentAmount", ["MonetaryAmount"])
                .property("loanPaymentFrequency", ["Number"])
                .property("numberOfLoanPayments", ["Number"])
                .include("Thing")
        })
        .entity_type("PropertyValue", |t| {
            t.subtype_of("StructuredValue")
                .property("maxValue", ["Number"])
                .property("minValue", ["Number"])
                .property("propertyID", ["Text", "URL"])
                .property("unitCode", ["Text", "URL"])
                .property("unitText", ["Text"])
                .property("value", ["Boolean", "Number", "Text"])
                .include("Thing")
        })
        .entity_type("GeoShape", |t| {
            t.subtype_of("StructuredValue")
                .property("address", ["Text"])
                .property("addressCountry", ["Text"])
                .property("box", ["Text"])
                .property("circle", ["Text"])
                .property("elevation", ["Number", "Text"])
                .property("line", ["Text"])
                .property("polygon", ["Text"])
                .property("postalCode", ["Text"])
                .include("Thing")
        })
        .entity_type("OpeningHoursSpecification", |t| {
            t.subtype_of("StructuredValue")
                .property("closes", ["Time"])
                .property("dayOfWeek", ["Text"])
                .property("opens", ["Time"])
                .property("validFrom", ["Date", "DateTime"])
                .property("validThrough", ["Date", "DateTime"])
                .include("Thing")
        })
        .entity_type("InteractionCounter", |t| {
            t.subtype_of("StructuredValue")
                .property("endTime", ["DateTime", "Time"])
                .property("interactionType", ["Action"])
                .property("startTime", ["DateTime", "Time"])
                .property("userInteractionCount", ["Integer"])
                .include("Thing")
        })
        .entity_type("Place", |t| t.subtype_of("Thing").include("Place").include("Thing"))
        .entity_type("AdministrativeArea", |t| {
            t.subtype_of("Place").include("Place").include("Thing")
        })
        .entity_type("Organization", |t| {
            t.subtype_of("Thing")
                .property("address", ["Text"])
                .property("email", ["Text"])
                .property("foundingDate", ["Date"])
                .property("legalName", ["Text"])
                .property("logo", ["ImageObject", "URL"])
                .property("parentOrganization", ["Organization"])
                .property("telephone", ["Text"])
                .include("Thing")
        })
        .entity_type("Person", |t| {
            t.subtype_of("Thing")
                .property("birthDate", ["Date"])
                .property("email", ["Text"])
                .property("familyName", ["Text"])
                .property("givenName", ["Text"])
                .property("jobTitle", ["Text"])
                .property("worksFor", ["Organization"])
                .include("Thing")
        })
        .entity_type("Brand", |t| {
            t.subtype_of("Intangible")
                .property("logo", ["ImageObject", "URL"])
                .property("slogan", ["Text"])
                .include("Thing")
        })
        .entity_type("Audience", |t| {
            t.subtype_of("Intangible")
                .property("audienceType", ["Text"])
                .property("geographicArea", ["AdministrativeArea"])
                .include("Thing")
        })
        .entity_type("ServiceChannel", |t| {
            t.subtype_of("Intangible")
                .property("availableLanguage", ["Language", "Text"])
                .property("processingTime", ["Duration"])
                .property("providesService", ["Service"])
                .property("serviceLocation", ["Place"])
                .property("serviceUrl", ["URL"])
                .include("Thing")
        })
        .entity_type("OfferCatalog", |t| {
            t.subtype_of("Intangible")
                .property("numberOfItems", ["Integer"])
                .include("Thing")
        })
        .entity_type("Offer", |t| {
            t.subtype_of("Intangible")
                .property("availabilityEnds", ["Date", "DateTime", "Time"])
                .property("availabilityStarts", ["Date", "DateTime", "Time"])
                .property("price", ["Number", "Text"])
                .property("priceCurrency", ["Text"])
                .property("seller", ["Organization", "Person"])
                .property("validFrom", ["Date", "DateTime"])
                .property("validThrough", ["Date", "DateTime"])
                .include("Thing")
        })
        .entity_type("MediaSubscription", |t| {
            t.subtype_of("Intangible")
                .property("authenticator", ["Organization"])
                .property("expectsAcceptanceOf", ["Offer"])
                .include("Thing")
        })
        .entity_type("Product", |t| {
            t.subtype_of("Thing")
                .property("brand", ["Brand", "Organization"])
                .property("gtin", ["Text"])
                .property("model", ["Product", "Text"])
                .property("offers", ["Offer"])
                .property("sku", ["Text"])
                .include("Thing")
        })
        .entity_type("Rating", |t| t.subtype_of("Intangible").include("Rating").include("Thing"))
        .entity_type("AggregateRating", |t| {
            t.subtype_of("Rating")
                .property("itemReviewed", ["Thing"])
                .property("ratingCount", ["Integer"])
                .property("reviewCount", ["Integer"])
                .include("Rating")
                .include("Thing")
        })
        .entity_type("Action", |t| {
            t.subtype_of("Thing")
                .property("agent", ["Organization", "Person"])
                .property("endTime", ["DateTime", "Time"])
                .property("object", ["Thing"])
                .property("result", ["Thing"])
                .property("startTime", ["DateTime", "Time"])
                .property("target", ["URL"])
                .include("Thing")
        })
        .entity_type("Event", |t| t.subtype_of("Thing").include("Event").include("Thing"))
        .entity_type("PublicationEvent", |t| {
            t.subtype_of("Event")
                .property("publishedBy", ["Organization", "Person"])
                .include("Event")
                .include("Thing")
        })
        .entity_type("Trip", |t| {
            t.subtype_of("Intangible")
                .property("arrivalTime", ["DateTime", "Time"])
                .property("departureTime", ["DateTime", "Time"])
                .property("itinerary", ["Place"])
                .property("offers", ["Offer"])
                .property("provider", ["Organization", "Person"])
                .include("Thing")
        })
        .entity_type("Language", |t| t.subtype_of("Intangible").include("Thing"))
        .entity_type("Distance", |t| t.subtype_of("Intangible").include("Thing"))
        .entity_type("AlignmentObject", |t| {
            t.subtype_of("Intangible")
                .property("alignmentType", ["Text"])
                .property("educationalFramework", ["Text"])
                .property("targetDescription", ["Text"])
                .property("targetName", ["Text"])
                .property("targetUrl", ["URL"])
                .include("Thing")
        })
        .entity_type("CategoryCode", |t| {
            t.subtype_of("Intangible")
                .property("codeValue", ["Text"])
                .property("inCodeSet", ["URL"])
                .property("termCode", ["Text"])
                .include("Thing")
        })
        .entity_type("CreativeWork", |t| {
            t.subtype_of("Thing").include("CreativeWork").include("Thing")
        })
        .entity_type("MediaObject", |t| {
            t.subtype_of("CreativeWork")
                .include("MediaObject")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("ImageObject", |t| {
            t.subtype_of("MediaObject")
                .property("caption", ["MediaObject", "Text"])
                .property("exifData", ["PropertyValue", "Text"])
                .property("representativeOfPage", ["Boolean"])
                .property("thumbnail", ["ImageObject"])
                .include("MediaObject")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("AudioObject", |t| {
            t.subtype_of("MediaObject")
                .property("caption", ["MediaObject", "Text"])
                .property("transcript", ["Text"])
                .include("MediaObject")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("VideoObject", |t| {
            t.subtype_of("MediaObject")
                .property("actor", ["Person"])
                .property("caption", ["MediaObject", "Text"])
                .property("director", ["Person"])
                .property("thumbnail", ["ImageObject"])
                .property("transcript", ["Text"])
                .property("videoFrameSize", ["Text"])
                .property("videoQuality", ["Text"])
                .include("MediaObject")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("NewsArticle", |t| {
            t.subtype_of("CreativeWork")
                .property("articleBody", ["Text"])
                .property("articleSection", ["Text"])
                .property("dateline", ["Text"])
                .property("printEdition", ["Text"])
                .property("wordCount", ["Integer"])
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("Legislation", |t| {
            t.subtype_of("CreativeWork")
                .include("Legislation")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("Review", |t| {
            t.subtype_of("CreativeWork")
                .property("itemReviewed", ["Thing"])
                .property("reviewBody", ["Text"])
                .property("reviewRating", ["Rating"])
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("Comment", |t| {
            t.subtype_of("CreativeWork")
                .include("Comment")
                .include("CreativeWork")
                .include("Thing")
        })
        .entity_type("CorrectionComment", |t| {
            t.subtype_of("Comment")
                .include("Comment")
                .include("CreativeWork")
                .include("Thing")
        })
}
